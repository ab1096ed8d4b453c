//! Training-task progress status machine.
//!
//! Lifecycle: PENDING → SUBMITTED → VERIFIED → APPROVED. The cadet app only
//! ever toggles between PENDING and SUBMITTED; VERIFIED and APPROVED are set
//! by officer/Master roles outside this library and are terminal from the
//! cadet's perspective.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Progress status for one (cadet, task template) pair.
///
/// A missing progress row is equivalent to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    Submitted,
    Verified,
    Approved,
}

impl TaskStatus {
    /// The database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Submitted => "SUBMITTED",
            Self::Verified => "VERIFIED",
            Self::Approved => "APPROVED",
        }
    }

    /// Parse the database representation.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "SUBMITTED" => Ok(Self::Submitted),
            "VERIFIED" => Ok(Self::Verified),
            "APPROVED" => Ok(Self::Approved),
            other => Err(CoreError::Validation(format!(
                "Unknown task status '{other}'"
            ))),
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Submitted => "Submitted",
            Self::Verified => "Verified",
            Self::Approved => "Approved",
        }
    }

    /// Whether the row is read-only for the cadet.
    ///
    /// Once an officer has verified (or the Master approved) a task, the
    /// cadet can no longer change its status or reflection text.
    pub fn is_locked_for_cadet(self) -> bool {
        matches!(self, Self::Verified | Self::Approved)
    }

    /// The cadet submit/un-submit toggle.
    ///
    /// PENDING ⇄ SUBMITTED, any number of times. Returns a `State` error for
    /// VERIFIED/APPROVED; callers must leave the row unmodified.
    pub fn toggle_submission(self) -> Result<TaskStatus, CoreError> {
        match self {
            Self::Pending => Ok(Self::Submitted),
            Self::Submitted => Ok(Self::Pending),
            Self::Verified | Self::Approved => Err(CoreError::State(format!(
                "Task is {} and can only be changed by an officer",
                self.label()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn pending_toggles_to_submitted() {
        assert_eq!(
            TaskStatus::Pending.toggle_submission().unwrap(),
            TaskStatus::Submitted
        );
    }

    #[test]
    fn submitted_toggles_back_to_pending() {
        assert_eq!(
            TaskStatus::Submitted.toggle_submission().unwrap(),
            TaskStatus::Pending
        );
    }

    #[test]
    fn toggle_is_repeatable() {
        let mut status = TaskStatus::Pending;
        for _ in 0..4 {
            status = status.toggle_submission().unwrap();
        }
        assert_eq!(status, TaskStatus::Pending);
    }

    #[test]
    fn verified_rejects_toggle() {
        assert_matches!(
            TaskStatus::Verified.toggle_submission(),
            Err(CoreError::State(_))
        );
    }

    #[test]
    fn approved_rejects_toggle() {
        assert_matches!(
            TaskStatus::Approved.toggle_submission(),
            Err(CoreError::State(_))
        );
    }

    #[test]
    fn lock_applies_to_verified_and_approved_only() {
        assert!(!TaskStatus::Pending.is_locked_for_cadet());
        assert!(!TaskStatus::Submitted.is_locked_for_cadet());
        assert!(TaskStatus::Verified.is_locked_for_cadet());
        assert!(TaskStatus::Approved.is_locked_for_cadet());
    }

    #[test]
    fn parse_round_trips_every_status() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::Submitted,
            TaskStatus::Verified,
            TaskStatus::Approved,
        ] {
            assert_eq!(TaskStatus::parse(status.as_str()).unwrap(), status);
        }
    }
}
