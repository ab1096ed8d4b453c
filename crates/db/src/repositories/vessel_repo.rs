//! Repository for the `vessel` table.
//!
//! Vessels are shore-administered reference data; the cadet flow only reads
//! and selects them. `insert` exists for seeding and future admin import.

use chrono::Utc;
use trb_core::error::CoreError;
use trb_core::ids::new_entity_id;

use crate::models::vessel::{CreateVessel, Vessel};
use crate::repositories::opt_text;
use crate::{DbError, DbPool};

/// Column list for `vessel` queries.
const COLUMNS: &str = "\
    id, name, imo_number, call_sign, flag_state, vessel_type, \
    gross_tonnage, length_overall_m, design_draft_m, main_engine_model, \
    main_engine_power_kw, generator_details, boiler_type, \
    nav_equipment_summary, created_at, updated_at";

/// Provides read and insert operations for vessels.
pub struct VesselRepo;

impl VesselRepo {
    /// Find a vessel by id.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Vessel>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM vessel WHERE id = ?1");
        let vessel = sqlx::query_as::<_, Vessel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(vessel)
    }

    /// List every vessel, alphabetically.
    pub async fn list_all(pool: &DbPool) -> Result<Vec<Vessel>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM vessel ORDER BY name ASC");
        let vessels = sqlx::query_as::<_, Vessel>(&query).fetch_all(pool).await?;
        Ok(vessels)
    }

    /// Insert a vessel. Rejected before any write when `name` is blank.
    pub async fn insert(pool: &DbPool, input: &CreateVessel) -> Result<Vessel, DbError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("Vessel name is required.".to_string()).into());
        }

        let now = Utc::now();
        let query = format!(
            "INSERT INTO vessel \
                 (id, name, imo_number, call_sign, flag_state, vessel_type, \
                  gross_tonnage, length_overall_m, design_draft_m, main_engine_model, \
                  main_engine_power_kw, generator_details, boiler_type, \
                  nav_equipment_summary, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?15) \
             RETURNING {COLUMNS}"
        );
        let vessel = sqlx::query_as::<_, Vessel>(&query)
            .bind(new_entity_id("vessel"))
            .bind(name)
            .bind(opt_text(&input.imo_number))
            .bind(opt_text(&input.call_sign))
            .bind(opt_text(&input.flag_state))
            .bind(input.vessel_type.map(|t| t.as_str()))
            .bind(input.gross_tonnage)
            .bind(input.length_overall_m)
            .bind(input.design_draft_m)
            .bind(opt_text(&input.main_engine_model))
            .bind(input.main_engine_power_kw)
            .bind(opt_text(&input.generator_details))
            .bind(opt_text(&input.boiler_type))
            .bind(opt_text(&input.nav_equipment_summary))
            .bind(now)
            .fetch_one(pool)
            .await?;
        Ok(vessel)
    }
}
