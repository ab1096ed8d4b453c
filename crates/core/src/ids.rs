//! Entity identifier generation.
//!
//! Every table uses a string primary key generated on-device. UUIDv7 keeps
//! ids time-ordered; the prefix makes raw ids readable in logs and exports.

use uuid::Uuid;

/// Build a new globally-unique entity id, e.g. `diary-0192b3c4-...`.
pub fn new_entity_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_carries_prefix() {
        let id = new_entity_id("vessel");
        assert!(id.starts_with("vessel-"));
    }

    #[test]
    fn ids_are_unique() {
        let a = new_entity_id("diary");
        let b = new_entity_id("diary");
        assert_ne!(a, b);
    }
}
