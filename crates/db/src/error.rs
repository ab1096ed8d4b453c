use trb_core::error::CoreError;

/// Error surface of the persistence layer.
///
/// `Core` carries validation and status-machine rejections unchanged from
/// `trb-core`; both happen before any write. `Storage` means the store
/// itself rejected a statement and the operation failed; callers may retry.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}
