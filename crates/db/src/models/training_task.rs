//! Training task template, progress, and evidence models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trb_core::stream::CadetStream;
use trb_core::types::Timestamp;

/// A row from the `training_task_template` table.
///
/// Immutable reference data: the canonical task catalogue for one stream,
/// seeded once on first run.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingTaskTemplate {
    pub id: String,
    pub section_code: String,
    pub title: String,
    pub description: String,
    pub stream: String,
    pub is_mandatory: bool,
}

/// DTO for inserting a template.
///
/// The id is caller-supplied: catalogue entries carry stable, readable ids
/// (`tpl-deck-nav-01`) so progress rows survive re-imports of the catalogue.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskTemplate {
    pub id: String,
    pub section_code: String,
    pub title: String,
    pub description: String,
    pub stream: CadetStream,
    pub is_mandatory: bool,
}

/// A row from the `training_task_progress` table.
///
/// At most one row per (cadet, template) pair. A missing row means PENDING.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingTaskProgress {
    pub id: String,
    pub cadet_id: String,
    pub template_id: String,
    pub status: String,
    pub last_status_change_at: Option<Timestamp>,
    pub reflection_text: Option<String>,
    pub verified_by_id: Option<String>,
    pub verified_by_name: Option<String>,
    pub verified_at: Option<Timestamp>,
    pub approved_by_master_id: Option<String>,
    pub approved_by_master_name: Option<String>,
    pub approved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lookup result for one (cadet, template) pair.
///
/// The absent-row-means-PENDING convention is made explicit here so callers
/// never null-check their way around it.
#[derive(Debug, Clone)]
pub enum ProgressLookup {
    Found(TrainingTaskProgress),
    DefaultPending,
}

impl ProgressLookup {
    /// The effective status string, PENDING when no row exists.
    pub fn status(&self) -> &str {
        match self {
            Self::Found(progress) => &progress.status,
            Self::DefaultPending => "PENDING",
        }
    }
}

/// A row from the `task_evidence` table.
///
/// Attachment record only: the file itself stays at `local_uri` on the
/// device and no transfer is handled here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskEvidence {
    pub id: String,
    pub task_progress_id: String,
    pub local_uri: String,
    pub mime_type: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub created_at: Timestamp,
}

/// DTO for attaching evidence to a progress row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskEvidence {
    pub task_progress_id: String,
    pub local_uri: String,
    pub mime_type: Option<String>,
    pub file_size_bytes: Option<i64>,
}
