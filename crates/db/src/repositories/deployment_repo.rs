//! Repository for the `sea_service_deployment` table.
//!
//! A deployment is created at sign-on, closed at sign-off (which freezes
//! the day count), and read back decorated with vessel identity for the
//! sea-service list.

use chrono::{NaiveDate, Utc};
use sqlx::FromRow;
use trb_core::dates::parse_calendar_date;
use trb_core::error::CoreError;
use trb_core::ids::new_entity_id;
use trb_core::sea_service::compute_days_onboard;

use crate::models::deployment::{
    CreateDeployment, DeploymentWithVessel, SeaServiceDeployment, SignOffDeployment,
    UpdateDeployment,
};
use crate::repositories::opt_text;
use crate::{DbError, DbPool};

/// Column list for `sea_service_deployment` queries.
const COLUMNS: &str = "\
    id, cadet_id, vessel_id, role, sign_on_date, sign_off_date, \
    sign_on_port, sign_off_port, total_days_onboard, total_sea_days, \
    total_port_days, voyage_summary, master_name, master_id, \
    chief_engineer_name, chief_engineer_id, dsto_name, dsto_id, \
    testimonial_text, testimonial_signed_at, created_at, updated_at";

/// Same list qualified with the `d.` alias for the vessel join.
const JOINED_COLUMNS: &str = "\
    d.id, d.cadet_id, d.vessel_id, d.role, d.sign_on_date, d.sign_off_date, \
    d.sign_on_port, d.sign_off_port, d.total_days_onboard, d.total_sea_days, \
    d.total_port_days, d.voyage_summary, d.master_name, d.master_id, \
    d.chief_engineer_name, d.chief_engineer_id, d.dsto_name, d.dsto_id, \
    d.testimonial_text, d.testimonial_signed_at, d.created_at, d.updated_at";

/// Join row: deployment columns plus the vessel decoration.
#[derive(FromRow)]
struct DeploymentVesselRow {
    #[sqlx(flatten)]
    deployment: SeaServiceDeployment,
    vessel_name: Option<String>,
    vessel_type: Option<String>,
    vessel_flag: Option<String>,
}

/// Provides sign-on/sign-off and read operations for deployments.
pub struct DeploymentRepo;

impl DeploymentRepo {
    /// Record a sign-on, opening a new deployment.
    ///
    /// Day totals stay null until sign-off. Rejected before any write when a
    /// required id or the sign-on date is missing, or when a sign-off date
    /// is supplied that precedes the sign-on date.
    pub async fn sign_on(
        pool: &DbPool,
        input: &CreateDeployment,
    ) -> Result<SeaServiceDeployment, DbError> {
        let cadet_id = input.cadet_id.trim();
        let vessel_id = input.vessel_id.trim();
        if cadet_id.is_empty() {
            return Err(CoreError::Validation("Cadet id is required.".to_string()).into());
        }
        if vessel_id.is_empty() {
            return Err(CoreError::Validation("Vessel id is required.".to_string()).into());
        }
        if input.sign_on_date.trim().is_empty() {
            return Err(CoreError::Validation("Sign-on date is required.".to_string()).into());
        }

        let sign_on_date = parse_calendar_date(&input.sign_on_date)?;
        let sign_off_date = match opt_text(&input.sign_off_date) {
            Some(raw) => Some(parse_calendar_date(&raw)?),
            None => None,
        };
        check_date_order(sign_on_date, sign_off_date)?;

        let now = Utc::now();
        let query = format!(
            "INSERT INTO sea_service_deployment \
                 (id, cadet_id, vessel_id, role, sign_on_date, sign_off_date, \
                  sign_on_port, voyage_summary, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9) \
             RETURNING {COLUMNS}"
        );
        let deployment = sqlx::query_as::<_, SeaServiceDeployment>(&query)
            .bind(new_entity_id("deployment"))
            .bind(cadet_id)
            .bind(vessel_id)
            .bind(input.role.as_str())
            .bind(sign_on_date)
            .bind(sign_off_date)
            .bind(opt_text(&input.sign_on_port))
            .bind(opt_text(&input.voyage_summary))
            .bind(now)
            .fetch_one(pool)
            .await?;
        Ok(deployment)
    }

    /// Close a deployment: record the sign-off and freeze the day count.
    ///
    /// `total_days_onboard` is computed once here; an already-frozen
    /// non-zero total (e.g. an admin correction) is kept as-is. The
    /// sea/port split comes from the caller's voyage log. A testimonial,
    /// when supplied, gets its signed timestamp now.
    pub async fn sign_off(
        pool: &DbPool,
        id: &str,
        input: &SignOffDeployment,
    ) -> Result<SeaServiceDeployment, DbError> {
        let existing = Self::require(pool, id).await?;

        let sign_off_date = parse_calendar_date(&input.sign_off_date)?;
        check_date_order(existing.sign_on_date, Some(sign_off_date))?;

        let total_days = compute_days_onboard(
            existing.total_days_onboard,
            Some(existing.sign_on_date),
            Some(sign_off_date),
        );

        let testimonial_text = opt_text(&input.testimonial_text);
        let now = Utc::now();
        let testimonial_signed_at = testimonial_text.is_some().then_some(now);

        let query = format!(
            "UPDATE sea_service_deployment SET \
                 sign_off_date         = ?2, \
                 sign_off_port         = ?3, \
                 total_days_onboard    = ?4, \
                 total_sea_days        = ?5, \
                 total_port_days       = ?6, \
                 testimonial_text      = ?7, \
                 testimonial_signed_at = ?8, \
                 updated_at            = ?9 \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );
        let deployment = sqlx::query_as::<_, SeaServiceDeployment>(&query)
            .bind(id)
            .bind(sign_off_date)
            .bind(opt_text(&input.sign_off_port))
            .bind(total_days)
            .bind(input.total_sea_days)
            .bind(input.total_port_days)
            .bind(testimonial_text)
            .bind(testimonial_signed_at)
            .bind(now)
            .fetch_one(pool)
            .await?;
        Ok(deployment)
    }

    /// Partial correction of a deployment. Absent fields keep their stored
    /// value; `updated_at` always refreshes. The frozen day count is never
    /// touched here, even when the dates themselves are corrected.
    pub async fn update(
        pool: &DbPool,
        id: &str,
        input: &UpdateDeployment,
    ) -> Result<SeaServiceDeployment, DbError> {
        let existing = Self::require(pool, id).await?;

        let sign_on_date = match opt_text(&input.sign_on_date) {
            Some(raw) => Some(parse_calendar_date(&raw)?),
            None => None,
        };
        let sign_off_date = match opt_text(&input.sign_off_date) {
            Some(raw) => Some(parse_calendar_date(&raw)?),
            None => None,
        };
        check_date_order(
            sign_on_date.unwrap_or(existing.sign_on_date),
            sign_off_date.or(existing.sign_off_date),
        )?;

        let query = format!(
            "UPDATE sea_service_deployment SET \
                 sign_on_date        = COALESCE(?2, sign_on_date), \
                 sign_off_date       = COALESCE(?3, sign_off_date), \
                 sign_on_port        = COALESCE(?4, sign_on_port), \
                 sign_off_port       = COALESCE(?5, sign_off_port), \
                 voyage_summary      = COALESCE(?6, voyage_summary), \
                 master_name         = COALESCE(?7, master_name), \
                 master_id           = COALESCE(?8, master_id), \
                 chief_engineer_name = COALESCE(?9, chief_engineer_name), \
                 chief_engineer_id   = COALESCE(?10, chief_engineer_id), \
                 dsto_name           = COALESCE(?11, dsto_name), \
                 dsto_id             = COALESCE(?12, dsto_id), \
                 testimonial_text    = COALESCE(?13, testimonial_text), \
                 updated_at          = ?14 \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );
        let deployment = sqlx::query_as::<_, SeaServiceDeployment>(&query)
            .bind(id)
            .bind(sign_on_date)
            .bind(sign_off_date)
            .bind(opt_text(&input.sign_on_port))
            .bind(opt_text(&input.sign_off_port))
            .bind(opt_text(&input.voyage_summary))
            .bind(opt_text(&input.master_name))
            .bind(opt_text(&input.master_id))
            .bind(opt_text(&input.chief_engineer_name))
            .bind(opt_text(&input.chief_engineer_id))
            .bind(opt_text(&input.dsto_name))
            .bind(opt_text(&input.dsto_id))
            .bind(opt_text(&input.testimonial_text))
            .bind(Utc::now())
            .fetch_one(pool)
            .await?;
        Ok(deployment)
    }

    /// Find a deployment by id.
    pub async fn find_by_id(
        pool: &DbPool,
        id: &str,
    ) -> Result<Option<SeaServiceDeployment>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM sea_service_deployment WHERE id = ?1");
        let deployment = sqlx::query_as::<_, SeaServiceDeployment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(deployment)
    }

    /// List a cadet's deployments, newest sign-on first, decorated with
    /// vessel identity and the live day count.
    pub async fn list_for_cadet(
        pool: &DbPool,
        cadet_id: &str,
    ) -> Result<Vec<DeploymentWithVessel>, DbError> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}, \
                    v.name AS vessel_name, \
                    v.vessel_type AS vessel_type, \
                    v.flag_state AS vessel_flag \
             FROM sea_service_deployment d \
             LEFT JOIN vessel v ON v.id = d.vessel_id \
             WHERE d.cadet_id = ?1 \
             ORDER BY d.sign_on_date DESC"
        );
        let rows = sqlx::query_as::<_, DeploymentVesselRow>(&query)
            .bind(cadet_id)
            .fetch_all(pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let days_onboard = compute_days_onboard(
                    row.deployment.total_days_onboard,
                    Some(row.deployment.sign_on_date),
                    row.deployment.sign_off_date,
                );
                DeploymentWithVessel {
                    deployment: row.deployment,
                    vessel_name: row.vessel_name,
                    vessel_type: row.vessel_type,
                    vessel_flag: row.vessel_flag,
                    days_onboard,
                }
            })
            .collect())
    }

    async fn require(pool: &DbPool, id: &str) -> Result<SeaServiceDeployment, DbError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| DbError::NotFound {
                entity: "Deployment",
                id: id.to_string(),
            })
    }
}

fn check_date_order(sign_on: NaiveDate, sign_off: Option<NaiveDate>) -> Result<(), CoreError> {
    if let Some(off) = sign_off {
        if off < sign_on {
            return Err(CoreError::Validation(
                "Sign-off date cannot be before the sign-on date.".to_string(),
            ));
        }
    }
    Ok(())
}
