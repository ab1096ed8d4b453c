//! Vessel entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trb_core::types::Timestamp;
use trb_core::vessel::VesselType;

/// A row from the `vessel` table.
///
/// Vessels are reference data owned by shore administration; the cadet app
/// reads and selects them (seed data aside) but has no edit flow.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vessel {
    pub id: String,
    pub name: String,
    pub imo_number: Option<String>,
    pub call_sign: Option<String>,
    pub flag_state: Option<String>,
    pub vessel_type: Option<String>,
    pub gross_tonnage: Option<f64>,
    pub length_overall_m: Option<f64>,
    pub design_draft_m: Option<f64>,
    pub main_engine_model: Option<String>,
    pub main_engine_power_kw: Option<f64>,
    pub generator_details: Option<String>,
    pub boiler_type: Option<String>,
    pub nav_equipment_summary: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a vessel (seeding / admin import path).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVessel {
    pub name: String,
    pub imo_number: Option<String>,
    pub call_sign: Option<String>,
    pub flag_state: Option<String>,
    pub vessel_type: Option<VesselType>,
    pub gross_tonnage: Option<f64>,
    pub length_overall_m: Option<f64>,
    pub design_draft_m: Option<f64>,
    pub main_engine_model: Option<String>,
    pub main_engine_power_kw: Option<f64>,
    pub generator_details: Option<String>,
    pub boiler_type: Option<String>,
    pub nav_equipment_summary: Option<String>,
}
