//! Diary / watchkeeping entry models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trb_core::position::{LatHemisphere, LonHemisphere};
use trb_core::types::{CalendarDate, Timestamp};
use trb_core::watch::DiaryEntryType;

/// A row from the `diary_entry` table.
///
/// One table covers all three entry kinds; the type-specific columns are
/// null for the kinds they don't apply to. `position_lat`/`position_lon`
/// hold the canonical `DD°MM.m'H` display strings, never raw input.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: String,
    pub cadet_id: String,
    pub deployment_id: Option<String>,
    pub date: CalendarDate,
    pub entry_type: String,
    pub time_start: Option<String>,
    pub time_end: Option<String>,
    pub summary: Option<String>,
    pub position_lat: Option<String>,
    pub position_lon: Option<String>,
    pub course_over_ground_deg: Option<f64>,
    pub speed_over_ground_knots: Option<f64>,
    pub weather_summary: Option<String>,
    pub role: Option<String>,
    pub steering_minutes: Option<i64>,
    pub machinery_monitored: Option<String>,
    pub remarks: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Raw latitude input: digit body (`DDMM.m`) plus hemisphere toggle.
#[derive(Debug, Clone, Deserialize)]
pub struct LatitudeInput {
    pub body: String,
    pub hemisphere: LatHemisphere,
}

/// Raw longitude input: digit body (`DDDMM.m`) plus hemisphere toggle.
#[derive(Debug, Clone, Deserialize)]
pub struct LongitudeInput {
    pub body: String,
    pub hemisphere: LonHemisphere,
}

/// The editable fields of an entry, shared by insert and update.
///
/// Fields that don't apply to `entry_type` are dropped on write: DAILY
/// entries lose their time range, only BRIDGE entries keep position /
/// course / steering data, only ENGINE entries keep `machinery_monitored`.
#[derive(Debug, Clone, Deserialize)]
pub struct DiaryEntryFields {
    pub date: String,
    pub entry_type: DiaryEntryType,
    pub time_start: Option<String>,
    pub time_end: Option<String>,
    pub summary: Option<String>,
    pub latitude: Option<LatitudeInput>,
    pub longitude: Option<LongitudeInput>,
    pub course_over_ground_deg: Option<f64>,
    pub speed_over_ground_knots: Option<f64>,
    pub weather_summary: Option<String>,
    pub role: Option<String>,
    pub steering_minutes: Option<i64>,
    pub machinery_monitored: Option<String>,
    pub remarks: Option<String>,
}

/// DTO for creating an entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDiaryEntry {
    pub cadet_id: String,
    pub deployment_id: Option<String>,
    #[serde(flatten)]
    pub fields: DiaryEntryFields,
}

/// A row from the `diary_entry_audit` table.
///
/// Append-only: one row per update, holding the full prior state as JSON.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DiaryEntryAudit {
    pub id: String,
    pub diary_entry_id: String,
    pub cadet_id: Option<String>,
    pub snapshot_json: String,
    pub change_type: String,
    pub changed_at: Timestamp,
}

/// Aggregate watch totals for the diary summary strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WatchTotals {
    pub total_entries: i64,
    pub bridge_hours: f64,
    pub engine_hours: f64,
}
