//! Current-user context.

use crate::stream::CadetStream;

/// Identifies the cadet a repository or bootstrap call acts for.
///
/// The consuming app builds one of these after loading (or creating) the
/// profile and threads it through every call, so the library never assumes a
/// fixed cadet identity and a second cadet on the same device is a
/// non-breaking extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CadetSession {
    pub cadet_id: String,
    pub stream: CadetStream,
}

impl CadetSession {
    pub fn new(cadet_id: impl Into<String>, stream: CadetStream) -> Self {
        Self {
            cadet_id: cadet_id.into(),
            stream,
        }
    }
}
