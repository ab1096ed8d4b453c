//! Diary entry types and watch-hours estimation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Entry type
// ---------------------------------------------------------------------------

/// Kind of diary entry.
///
/// DAILY entries are free-text summaries with no time range; BRIDGE and
/// ENGINE entries are watches and require a start and end time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiaryEntryType {
    Daily,
    Bridge,
    Engine,
}

impl DiaryEntryType {
    /// The database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Bridge => "BRIDGE",
            Self::Engine => "ENGINE",
        }
    }

    /// Parse the database representation.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "DAILY" => Ok(Self::Daily),
            "BRIDGE" => Ok(Self::Bridge),
            "ENGINE" => Ok(Self::Engine),
            other => Err(CoreError::Validation(format!(
                "Unknown diary entry type '{other}'"
            ))),
        }
    }

    /// Watch entries carry a time range; DAILY entries do not.
    pub fn is_watch(self) -> bool {
        matches!(self, Self::Bridge | Self::Engine)
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Bridge => "Bridge watch",
            Self::Engine => "Engine watch",
        }
    }
}

// ---------------------------------------------------------------------------
// Hours estimation
// ---------------------------------------------------------------------------

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Estimate the duration of a watch in hours from `HH:MM` endpoints.
///
/// An end before the start means the watch crossed midnight, so a day is
/// added (`22:00`–`02:00` is 4 hours). Returns 0 when either endpoint is
/// absent or blank. Non-numeric components degrade to 0 rather than failing;
/// times come from a picker and are not free-form user input.
pub fn estimate_hours(start: Option<&str>, end: Option<&str>) -> f64 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0.0;
    };
    if start.trim().is_empty() || end.trim().is_empty() {
        return 0.0;
    }

    let start_min = minutes_since_midnight(start);
    let mut end_min = minutes_since_midnight(end);

    if end_min < start_min {
        end_min += MINUTES_PER_DAY;
    }

    f64::from(end_min - start_min) / 60.0
}

fn minutes_since_midnight(time: &str) -> i32 {
    let mut parts = time.splitn(2, ':');
    let hours = parse_component(parts.next());
    let minutes = parse_component(parts.next());
    hours * 60 + minutes
}

fn parse_component(part: Option<&str>) -> i32 {
    part.and_then(|p| p.trim().parse::<i32>().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- estimate_hours --

    #[test]
    fn plain_morning_watch_is_four_hours() {
        assert_eq!(estimate_hours(Some("04:00"), Some("08:00")), 4.0);
    }

    #[test]
    fn midnight_rollover_adds_a_day() {
        assert_eq!(estimate_hours(Some("22:00"), Some("02:00")), 4.0);
    }

    #[test]
    fn partial_hours_are_fractional() {
        assert_eq!(estimate_hours(Some("08:00"), Some("09:30")), 1.5);
    }

    #[test]
    fn blank_start_is_zero() {
        assert_eq!(estimate_hours(Some(""), Some("08:00")), 0.0);
    }

    #[test]
    fn missing_end_is_zero() {
        assert_eq!(estimate_hours(Some("04:00"), None), 0.0);
    }

    #[test]
    fn equal_endpoints_are_zero_hours() {
        assert_eq!(estimate_hours(Some("08:00"), Some("08:00")), 0.0);
    }

    #[test]
    fn garbage_components_degrade_to_zero() {
        assert_eq!(estimate_hours(Some("ab:cd"), Some("02:00")), 2.0);
    }

    // -- DiaryEntryType --

    #[test]
    fn watch_flag_covers_bridge_and_engine() {
        assert!(!DiaryEntryType::Daily.is_watch());
        assert!(DiaryEntryType::Bridge.is_watch());
        assert!(DiaryEntryType::Engine.is_watch());
    }

    #[test]
    fn parse_round_trips_every_type() {
        for entry_type in [
            DiaryEntryType::Daily,
            DiaryEntryType::Bridge,
            DiaryEntryType::Engine,
        ] {
            assert_eq!(DiaryEntryType::parse(entry_type.as_str()).unwrap(), entry_type);
        }
    }
}
