//! Repository for training task templates, progress, and evidence.
//!
//! Progress rows are created lazily: a cadet's first toggle or reflection
//! write against a template materializes the row, so "no row" and
//! "PENDING, untouched" mean the same thing everywhere.

use chrono::Utc;
use trb_core::error::CoreError;
use trb_core::ids::new_entity_id;
use trb_core::stream::CadetStream;
use trb_core::task_status::TaskStatus;

use crate::models::training_task::{
    CreateTaskEvidence, CreateTaskTemplate, ProgressLookup, TaskEvidence, TrainingTaskProgress,
    TrainingTaskTemplate,
};
use crate::repositories::opt_text;
use crate::{DbError, DbPool};

/// Column list for `training_task_template` queries.
const TEMPLATE_COLUMNS: &str = "id, section_code, title, description, stream, is_mandatory";

/// Column list for `training_task_progress` queries.
const PROGRESS_COLUMNS: &str = "\
    id, cadet_id, template_id, status, last_status_change_at, \
    reflection_text, verified_by_id, verified_by_name, verified_at, \
    approved_by_master_id, approved_by_master_name, approved_at, \
    created_at, updated_at";

/// Column list for `task_evidence` queries.
const EVIDENCE_COLUMNS: &str =
    "id, task_progress_id, local_uri, mime_type, file_size_bytes, created_at";

/// Provides template, progress, and evidence operations.
pub struct TaskRepo;

impl TaskRepo {
    // -----------------------------------------------------------------------
    // Templates
    // -----------------------------------------------------------------------

    /// Insert a catalogue template.
    pub async fn insert_template(
        pool: &DbPool,
        input: &CreateTaskTemplate,
    ) -> Result<TrainingTaskTemplate, DbError> {
        let id = input.id.trim();
        let section_code = input.section_code.trim();
        let title = input.title.trim();
        if id.is_empty() || section_code.is_empty() || title.is_empty() {
            return Err(CoreError::Validation(
                "Template id, section code and title are required.".to_string(),
            )
            .into());
        }

        let query = format!(
            "INSERT INTO training_task_template \
                 (id, section_code, title, description, stream, is_mandatory) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             RETURNING {TEMPLATE_COLUMNS}"
        );
        let template = sqlx::query_as::<_, TrainingTaskTemplate>(&query)
            .bind(id)
            .bind(section_code)
            .bind(title)
            .bind(input.description.trim())
            .bind(input.stream.as_str())
            .bind(input.is_mandatory)
            .fetch_one(pool)
            .await?;
        Ok(template)
    }

    /// List the task catalogue for one stream, grouped by section.
    pub async fn list_templates_for_stream(
        pool: &DbPool,
        stream: CadetStream,
    ) -> Result<Vec<TrainingTaskTemplate>, DbError> {
        let query = format!(
            "SELECT {TEMPLATE_COLUMNS} FROM training_task_template \
             WHERE stream = ?1 ORDER BY section_code ASC, id ASC"
        );
        let templates = sqlx::query_as::<_, TrainingTaskTemplate>(&query)
            .bind(stream.as_str())
            .fetch_all(pool)
            .await?;
        Ok(templates)
    }

    /// Total number of templates across all streams.
    pub async fn count_templates(pool: &DbPool) -> Result<i64, DbError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM training_task_template")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    // -----------------------------------------------------------------------
    // Progress
    // -----------------------------------------------------------------------

    /// Look up the progress row for one (cadet, template) pair.
    pub async fn find_progress(
        pool: &DbPool,
        cadet_id: &str,
        template_id: &str,
    ) -> Result<ProgressLookup, DbError> {
        let query = format!(
            "SELECT {PROGRESS_COLUMNS} FROM training_task_progress \
             WHERE cadet_id = ?1 AND template_id = ?2"
        );
        let row = sqlx::query_as::<_, TrainingTaskProgress>(&query)
            .bind(cadet_id)
            .bind(template_id)
            .fetch_optional(pool)
            .await?;
        Ok(match row {
            Some(progress) => ProgressLookup::Found(progress),
            None => ProgressLookup::DefaultPending,
        })
    }

    /// List all progress rows for a cadet.
    pub async fn list_progress_for_cadet(
        pool: &DbPool,
        cadet_id: &str,
    ) -> Result<Vec<TrainingTaskProgress>, DbError> {
        let query = format!(
            "SELECT {PROGRESS_COLUMNS} FROM training_task_progress \
             WHERE cadet_id = ?1 ORDER BY template_id ASC"
        );
        let rows = sqlx::query_as::<_, TrainingTaskProgress>(&query)
            .bind(cadet_id)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// The cadet submit/un-submit toggle for one task.
    ///
    /// Creates the row (from its implicit PENDING state) when absent.
    /// Returns a `State` error and leaves the row untouched once an officer
    /// has verified or the Master approved it.
    pub async fn toggle_submission(
        pool: &DbPool,
        cadet_id: &str,
        template_id: &str,
    ) -> Result<TrainingTaskProgress, DbError> {
        match Self::find_progress(pool, cadet_id, template_id).await? {
            ProgressLookup::Found(progress) => {
                let current = TaskStatus::parse(&progress.status)?;
                let next = current.toggle_submission()?;

                let now = Utc::now();
                let query = format!(
                    "UPDATE training_task_progress SET \
                         status                = ?2, \
                         last_status_change_at = ?3, \
                         updated_at            = ?3 \
                     WHERE id = ?1 \
                     RETURNING {PROGRESS_COLUMNS}"
                );
                let updated = sqlx::query_as::<_, TrainingTaskProgress>(&query)
                    .bind(&progress.id)
                    .bind(next.as_str())
                    .bind(now)
                    .fetch_one(pool)
                    .await?;
                Ok(updated)
            }
            ProgressLookup::DefaultPending => {
                let next = TaskStatus::Pending.toggle_submission()?;
                Self::insert_progress_row(pool, cadet_id, template_id, next, None).await
            }
        }
    }

    /// Save the cadet's reflection text for one task.
    ///
    /// Creates a PENDING row when absent; never changes status. Rejected
    /// once the task is verified or approved.
    pub async fn save_reflection(
        pool: &DbPool,
        cadet_id: &str,
        template_id: &str,
        reflection: &str,
    ) -> Result<TrainingTaskProgress, DbError> {
        let reflection = opt_text(&Some(reflection.to_string()));

        match Self::find_progress(pool, cadet_id, template_id).await? {
            ProgressLookup::Found(progress) => {
                let status = TaskStatus::parse(&progress.status)?;
                if status.is_locked_for_cadet() {
                    return Err(CoreError::State(format!(
                        "Reflection is read-only once a task is {}",
                        status.label()
                    ))
                    .into());
                }

                let query = format!(
                    "UPDATE training_task_progress SET \
                         reflection_text = ?2, \
                         updated_at      = ?3 \
                     WHERE id = ?1 \
                     RETURNING {PROGRESS_COLUMNS}"
                );
                let updated = sqlx::query_as::<_, TrainingTaskProgress>(&query)
                    .bind(&progress.id)
                    .bind(reflection)
                    .bind(Utc::now())
                    .fetch_one(pool)
                    .await?;
                Ok(updated)
            }
            ProgressLookup::DefaultPending => {
                Self::insert_progress_row(pool, cadet_id, template_id, TaskStatus::Pending, reflection)
                    .await
            }
        }
    }

    /// Materialize a progress row.
    ///
    /// `last_status_change_at` is only stamped when the row is born in a
    /// status other than its implicit PENDING.
    pub(crate) async fn insert_progress_row(
        pool: &DbPool,
        cadet_id: &str,
        template_id: &str,
        status: TaskStatus,
        reflection: Option<String>,
    ) -> Result<TrainingTaskProgress, DbError> {
        let now = Utc::now();
        let last_status_change_at = (status != TaskStatus::Pending).then_some(now);

        let query = format!(
            "INSERT INTO training_task_progress \
                 (id, cadet_id, template_id, status, last_status_change_at, \
                  reflection_text, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7) \
             RETURNING {PROGRESS_COLUMNS}"
        );
        let progress = sqlx::query_as::<_, TrainingTaskProgress>(&query)
            .bind(new_entity_id("progress"))
            .bind(cadet_id)
            .bind(template_id)
            .bind(status.as_str())
            .bind(last_status_change_at)
            .bind(reflection)
            .bind(now)
            .fetch_one(pool)
            .await?;
        Ok(progress)
    }

    // -----------------------------------------------------------------------
    // Evidence
    // -----------------------------------------------------------------------

    /// Attach an evidence record to a progress row.
    pub async fn add_evidence(
        pool: &DbPool,
        input: &CreateTaskEvidence,
    ) -> Result<TaskEvidence, DbError> {
        let task_progress_id = input.task_progress_id.trim();
        let local_uri = input.local_uri.trim();
        if task_progress_id.is_empty() || local_uri.is_empty() {
            return Err(CoreError::Validation(
                "Evidence requires a task progress id and a file URI.".to_string(),
            )
            .into());
        }

        let query = format!(
            "INSERT INTO task_evidence \
                 (id, task_progress_id, local_uri, mime_type, file_size_bytes, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             RETURNING {EVIDENCE_COLUMNS}"
        );
        let evidence = sqlx::query_as::<_, TaskEvidence>(&query)
            .bind(new_entity_id("evidence"))
            .bind(task_progress_id)
            .bind(local_uri)
            .bind(opt_text(&input.mime_type))
            .bind(input.file_size_bytes)
            .bind(Utc::now())
            .fetch_one(pool)
            .await?;
        Ok(evidence)
    }

    /// List evidence for one progress row, newest first.
    pub async fn list_evidence(
        pool: &DbPool,
        task_progress_id: &str,
    ) -> Result<Vec<TaskEvidence>, DbError> {
        let query = format!(
            "SELECT {EVIDENCE_COLUMNS} FROM task_evidence \
             WHERE task_progress_id = ?1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, TaskEvidence>(&query)
            .bind(task_progress_id)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }
}
