//! Sea-service day counting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Deployment role
// ---------------------------------------------------------------------------

/// The capacity a cadet serves in for one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeaServiceRole {
    Cadet,
    TraineeEngineer,
    TraineeEto,
    Other,
}

impl SeaServiceRole {
    /// The database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cadet => "CADET",
            Self::TraineeEngineer => "TRAINEE_ENGINEER",
            Self::TraineeEto => "TRAINEE_ETO",
            Self::Other => "OTHER",
        }
    }

    /// Parse the database representation.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "CADET" => Ok(Self::Cadet),
            "TRAINEE_ENGINEER" => Ok(Self::TraineeEngineer),
            "TRAINEE_ETO" => Ok(Self::TraineeEto),
            "OTHER" => Ok(Self::Other),
            other => Err(CoreError::Validation(format!(
                "Unknown sea service role '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Day calculator
// ---------------------------------------------------------------------------

/// Derive the total days onboard for a deployment.
///
/// A stored total > 0 is authoritative and returned unchanged: the count is
/// frozen at sign-off and an admin-corrected value must survive later
/// recomputation. Otherwise the count is inclusive of both boundary days
/// (`sign off − sign on + 1`), 0 while the contract is still open, and
/// clamped to 0 when sign-off precedes sign-on (a data-entry error upstream
/// validation should already have rejected).
pub fn compute_days_onboard(
    stored_total: Option<i64>,
    sign_on: Option<NaiveDate>,
    sign_off: Option<NaiveDate>,
) -> i64 {
    if let Some(total) = stored_total {
        if total > 0 {
            return total;
        }
    }

    let (Some(on), Some(off)) = (sign_on, sign_off) else {
        return 0;
    };

    (off.signed_duration_since(on).num_days() + 1).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    // -- compute_days_onboard --

    #[test]
    fn counts_both_boundary_days() {
        let days = compute_days_onboard(None, Some(date("2024-01-15")), Some(date("2024-07-20")));
        assert_eq!(days, 188);
    }

    #[test]
    fn single_day_contract_counts_one() {
        let days = compute_days_onboard(None, Some(date("2024-03-01")), Some(date("2024-03-01")));
        assert_eq!(days, 1);
    }

    #[test]
    fn open_contract_counts_zero() {
        let days = compute_days_onboard(None, Some(date("2024-01-15")), None);
        assert_eq!(days, 0);
    }

    #[test]
    fn missing_sign_on_counts_zero() {
        let days = compute_days_onboard(None, None, Some(date("2024-07-20")));
        assert_eq!(days, 0);
    }

    #[test]
    fn sign_off_before_sign_on_clamps_to_zero() {
        let days = compute_days_onboard(None, Some(date("2024-07-20")), Some(date("2024-01-15")));
        assert_eq!(days, 0);
    }

    #[test]
    fn stored_total_is_authoritative() {
        // Dates were later edited to a different span; the frozen value wins.
        let days = compute_days_onboard(
            Some(90),
            Some(date("2024-01-15")),
            Some(date("2024-07-20")),
        );
        assert_eq!(days, 90);
    }

    #[test]
    fn stored_zero_is_not_frozen() {
        let days =
            compute_days_onboard(Some(0), Some(date("2024-01-15")), Some(date("2024-01-16")));
        assert_eq!(days, 2);
    }

    // -- SeaServiceRole --

    #[test]
    fn role_parse_round_trips() {
        for role in [
            SeaServiceRole::Cadet,
            SeaServiceRole::TraineeEngineer,
            SeaServiceRole::TraineeEto,
            SeaServiceRole::Other,
        ] {
            assert_eq!(SeaServiceRole::parse(role.as_str()).unwrap(), role);
        }
    }
}
