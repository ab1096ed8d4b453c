//! Sea-service deployment entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trb_core::sea_service::SeaServiceRole;
use trb_core::types::{CalendarDate, Timestamp};

/// A row from the `sea_service_deployment` table.
///
/// A null `sign_off_date` means the contract is still open; day totals stay
/// null until sign-off freezes them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SeaServiceDeployment {
    pub id: String,
    pub cadet_id: String,
    pub vessel_id: String,
    pub role: String,
    pub sign_on_date: CalendarDate,
    pub sign_off_date: Option<CalendarDate>,
    pub sign_on_port: Option<String>,
    pub sign_off_port: Option<String>,
    pub total_days_onboard: Option<i64>,
    pub total_sea_days: Option<i64>,
    pub total_port_days: Option<i64>,
    pub voyage_summary: Option<String>,
    pub master_name: Option<String>,
    pub master_id: Option<String>,
    pub chief_engineer_name: Option<String>,
    pub chief_engineer_id: Option<String>,
    pub dsto_name: Option<String>,
    pub dsto_id: Option<String>,
    pub testimonial_text: Option<String>,
    pub testimonial_signed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for signing on to a vessel. Dates arrive as raw `YYYY-MM-DD` text.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDeployment {
    pub cadet_id: String,
    pub vessel_id: String,
    pub role: SeaServiceRole,
    pub sign_on_date: String,
    pub sign_off_date: Option<String>,
    pub sign_on_port: Option<String>,
    pub voyage_summary: Option<String>,
}

/// DTO for signing off a deployment.
///
/// Closing the contract computes and freezes `total_days_onboard`; the
/// sea/port split is keyed in from the voyage log rather than derived.
#[derive(Debug, Clone, Deserialize)]
pub struct SignOffDeployment {
    pub sign_off_date: String,
    pub sign_off_port: Option<String>,
    pub total_sea_days: Option<i64>,
    pub total_port_days: Option<i64>,
    pub testimonial_text: Option<String>,
}

/// DTO for partial corrections to a deployment. Absent fields keep their
/// stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDeployment {
    pub sign_on_date: Option<String>,
    pub sign_off_date: Option<String>,
    pub sign_on_port: Option<String>,
    pub sign_off_port: Option<String>,
    pub voyage_summary: Option<String>,
    pub master_name: Option<String>,
    pub master_id: Option<String>,
    pub chief_engineer_name: Option<String>,
    pub chief_engineer_id: Option<String>,
    pub dsto_name: Option<String>,
    pub dsto_id: Option<String>,
    pub testimonial_text: Option<String>,
}

/// A deployment decorated with vessel identity for list display.
///
/// Read-time denormalization: the vessel columns are joined in, never
/// stored. `days_onboard` is the live calculator output: the frozen total
/// for closed contracts, the running count (0 while dates are incomplete)
/// for open ones.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentWithVessel {
    #[serde(flatten)]
    pub deployment: SeaServiceDeployment,
    pub vessel_name: Option<String>,
    pub vessel_type: Option<String>,
    pub vessel_flag: Option<String>,
    pub days_onboard: i64,
}
