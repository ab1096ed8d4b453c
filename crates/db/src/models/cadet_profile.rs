//! Cadet profile entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trb_core::stream::CadetStream;
use trb_core::types::{CalendarDate, Timestamp};

/// A row from the `cadet_profile` table.
///
/// One row per cadet identity; the single-cadet deployment model keeps
/// exactly one active row, created on first save and never deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CadetProfile {
    pub id: String,
    pub full_name: String,
    pub date_of_birth: Option<CalendarDate>,
    pub stream: String,
    pub discharge_book_no: Option<String>,
    pub passport_no: Option<String>,
    pub academy_name: Option<String>,
    pub academy_id: Option<String>,
    pub next_of_kin_name: Option<String>,
    pub next_of_kin_contact: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the profile save screen (insert-or-update by cadet id).
///
/// `date_of_birth` arrives as the raw `YYYY-MM-DD` field text and is
/// calendar-checked before any write.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveCadetProfile {
    pub full_name: String,
    pub date_of_birth: Option<String>,
    pub stream: CadetStream,
    pub discharge_book_no: Option<String>,
    pub passport_no: Option<String>,
    pub academy_name: Option<String>,
    pub academy_id: Option<String>,
    pub next_of_kin_name: Option<String>,
    pub next_of_kin_contact: Option<String>,
}
