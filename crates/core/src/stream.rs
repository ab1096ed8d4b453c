//! Cadet stream (specialization track).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Cadet specialization: deck, engine, or electro-technical officer track.
///
/// Stored as TEXT (`DECK` / `ENGINE` / `ETO`) on `cadet_profile.stream` and
/// `training_task_template.stream`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CadetStream {
    Deck,
    Engine,
    Eto,
}

impl CadetStream {
    /// All streams, in seeding order.
    pub const ALL: [CadetStream; 3] = [Self::Deck, Self::Engine, Self::Eto];

    /// The database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deck => "DECK",
            Self::Engine => "ENGINE",
            Self::Eto => "ETO",
        }
    }

    /// Parse the database representation.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "DECK" => Ok(Self::Deck),
            "ENGINE" => Ok(Self::Engine),
            "ETO" => Ok(Self::Eto),
            other => Err(CoreError::Validation(format!(
                "Unknown cadet stream '{other}'. Must be one of: DECK, ENGINE, ETO"
            ))),
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Deck => "Deck",
            Self::Engine => "Engine",
            Self::Eto => "Electro-Technical",
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CoreError;

    #[test]
    fn parse_round_trips_every_stream() {
        for stream in CadetStream::ALL {
            assert_eq!(CadetStream::parse(stream.as_str()).unwrap(), stream);
        }
    }

    #[test]
    fn parse_rejects_unknown_value() {
        assert_matches!(
            CadetStream::parse("CATERING"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_matches!(CadetStream::parse("deck"), Err(CoreError::Validation(_)));
    }
}
