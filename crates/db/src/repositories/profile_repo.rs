//! Repository for the `cadet_profile` table.

use chrono::Utc;
use trb_core::dates::parse_calendar_date;
use trb_core::error::CoreError;

use crate::models::cadet_profile::{CadetProfile, SaveCadetProfile};
use crate::repositories::opt_text;
use crate::{DbError, DbPool};

/// Column list for `cadet_profile` queries.
const COLUMNS: &str = "\
    id, full_name, date_of_birth, stream, discharge_book_no, passport_no, \
    academy_name, academy_id, next_of_kin_name, next_of_kin_contact, \
    created_at, updated_at";

/// Provides read and save operations for the cadet profile.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find a profile by cadet id.
    pub async fn find_by_id(
        pool: &DbPool,
        cadet_id: &str,
    ) -> Result<Option<CadetProfile>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM cadet_profile WHERE id = ?1");
        let profile = sqlx::query_as::<_, CadetProfile>(&query)
            .bind(cadet_id)
            .fetch_optional(pool)
            .await?;
        Ok(profile)
    }

    /// Insert-or-update the profile for `cadet_id`.
    ///
    /// The first save creates the row (`created_at = updated_at = now`);
    /// every later save updates it in place, preserving `created_at`.
    /// Rejected before any write when `full_name` is blank or
    /// `date_of_birth` fails its calendar check.
    pub async fn upsert(
        pool: &DbPool,
        cadet_id: &str,
        input: &SaveCadetProfile,
    ) -> Result<CadetProfile, DbError> {
        let full_name = input.full_name.trim();
        if full_name.is_empty() {
            return Err(CoreError::Validation("Cadet full name is required.".to_string()).into());
        }

        let date_of_birth = match opt_text(&input.date_of_birth) {
            Some(raw) => Some(parse_calendar_date(&raw)?),
            None => None,
        };

        let now = Utc::now();
        let query = format!(
            "INSERT INTO cadet_profile \
                 (id, full_name, date_of_birth, stream, discharge_book_no, passport_no, \
                  academy_name, academy_id, next_of_kin_name, next_of_kin_contact, \
                  created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11) \
             ON CONFLICT (id) DO UPDATE SET \
                 full_name           = excluded.full_name, \
                 date_of_birth       = excluded.date_of_birth, \
                 stream              = excluded.stream, \
                 discharge_book_no   = excluded.discharge_book_no, \
                 passport_no         = excluded.passport_no, \
                 academy_name        = excluded.academy_name, \
                 academy_id          = excluded.academy_id, \
                 next_of_kin_name    = excluded.next_of_kin_name, \
                 next_of_kin_contact = excluded.next_of_kin_contact, \
                 updated_at          = excluded.updated_at \
             RETURNING {COLUMNS}"
        );
        let profile = sqlx::query_as::<_, CadetProfile>(&query)
            .bind(cadet_id)
            .bind(full_name)
            .bind(date_of_birth)
            .bind(input.stream.as_str())
            .bind(opt_text(&input.discharge_book_no))
            .bind(opt_text(&input.passport_no))
            .bind(opt_text(&input.academy_name))
            .bind(opt_text(&input.academy_id))
            .bind(opt_text(&input.next_of_kin_name))
            .bind(opt_text(&input.next_of_kin_contact))
            .bind(now)
            .fetch_one(pool)
            .await?;
        Ok(profile)
    }
}
