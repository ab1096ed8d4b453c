//! Repository for diary / watchkeeping entries and their audit trail.
//!
//! Entries are mutable; every update first snapshots the prior state into
//! `diary_entry_audit`, and snapshot + update commit as one transaction so
//! neither is ever observed without the other.

use chrono::{NaiveDate, Utc};
use trb_core::dates::parse_calendar_date;
use trb_core::error::CoreError;
use trb_core::ids::new_entity_id;
use trb_core::position::{encode_latitude, encode_longitude};
use trb_core::watch::{estimate_hours, DiaryEntryType};

use crate::models::diary::{
    CreateDiaryEntry, DiaryEntry, DiaryEntryAudit, DiaryEntryFields, WatchTotals,
};
use crate::repositories::opt_text;
use crate::{DbError, DbPool};

/// Column list for `diary_entry` queries.
const COLUMNS: &str = "\
    id, cadet_id, deployment_id, date, entry_type, time_start, time_end, \
    summary, position_lat, position_lon, course_over_ground_deg, \
    speed_over_ground_knots, weather_summary, role, steering_minutes, \
    machinery_monitored, remarks, created_at, updated_at";

/// Column list for `diary_entry_audit` queries.
const AUDIT_COLUMNS: &str =
    "id, diary_entry_id, cadet_id, snapshot_json, change_type, changed_at";

/// Change-type marker written on every entry update.
pub const CHANGE_TYPE_UPDATE: &str = "UPDATE";

/// Entry fields validated, type-filtered, and position-encoded, ready to
/// bind.
struct PreparedEntry {
    date: NaiveDate,
    entry_type: DiaryEntryType,
    time_start: Option<String>,
    time_end: Option<String>,
    summary: Option<String>,
    position_lat: Option<String>,
    position_lon: Option<String>,
    course_over_ground_deg: Option<f64>,
    speed_over_ground_knots: Option<f64>,
    weather_summary: Option<String>,
    role: Option<String>,
    steering_minutes: Option<i64>,
    machinery_monitored: Option<String>,
    remarks: Option<String>,
}

/// Provides insert/update/read operations for diary entries.
pub struct DiaryRepo;

impl DiaryRepo {
    /// Record a new diary or watch entry.
    ///
    /// All validation (date, watch time range, position bounds) happens
    /// before any write; latitude/longitude are persisted as their
    /// canonical display strings.
    pub async fn insert(pool: &DbPool, input: &CreateDiaryEntry) -> Result<DiaryEntry, DbError> {
        let cadet_id = input.cadet_id.trim();
        if cadet_id.is_empty() {
            return Err(CoreError::Validation("Cadet id is required.".to_string()).into());
        }
        let prepared = prepare_fields(&input.fields)?;

        let now = Utc::now();
        let query = format!(
            "INSERT INTO diary_entry \
                 (id, cadet_id, deployment_id, date, entry_type, time_start, \
                  time_end, summary, position_lat, position_lon, \
                  course_over_ground_deg, speed_over_ground_knots, \
                  weather_summary, role, steering_minutes, machinery_monitored, \
                  remarks, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, \
                     ?14, ?15, ?16, ?17, ?18, ?18) \
             RETURNING {COLUMNS}"
        );
        let entry = sqlx::query_as::<_, DiaryEntry>(&query)
            .bind(new_entity_id("diary"))
            .bind(cadet_id)
            .bind(opt_text(&input.deployment_id))
            .bind(prepared.date)
            .bind(prepared.entry_type.as_str())
            .bind(&prepared.time_start)
            .bind(&prepared.time_end)
            .bind(&prepared.summary)
            .bind(&prepared.position_lat)
            .bind(&prepared.position_lon)
            .bind(prepared.course_over_ground_deg)
            .bind(prepared.speed_over_ground_knots)
            .bind(&prepared.weather_summary)
            .bind(&prepared.role)
            .bind(prepared.steering_minutes)
            .bind(&prepared.machinery_monitored)
            .bind(&prepared.remarks)
            .bind(now)
            .fetch_one(pool)
            .await?;
        Ok(entry)
    }

    /// Rewrite an entry in place, snapshotting the prior state first.
    ///
    /// The audit insert and the entry update run inside one transaction:
    /// either both land or neither does.
    pub async fn update(
        pool: &DbPool,
        id: &str,
        fields: &DiaryEntryFields,
    ) -> Result<DiaryEntry, DbError> {
        let existing = Self::require(pool, id).await?;
        let prepared = prepare_fields(fields)?;
        let snapshot_json = serde_json::to_string(&existing)?;

        let now = Utc::now();
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO diary_entry_audit \
                 (id, diary_entry_id, cadet_id, snapshot_json, change_type, changed_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(new_entity_id("diary-audit"))
        .bind(&existing.id)
        .bind(&existing.cadet_id)
        .bind(&snapshot_json)
        .bind(CHANGE_TYPE_UPDATE)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE diary_entry SET \
                 date                    = ?2, \
                 entry_type              = ?3, \
                 time_start              = ?4, \
                 time_end                = ?5, \
                 summary                 = ?6, \
                 position_lat            = ?7, \
                 position_lon            = ?8, \
                 course_over_ground_deg  = ?9, \
                 speed_over_ground_knots = ?10, \
                 weather_summary         = ?11, \
                 role                    = ?12, \
                 steering_minutes        = ?13, \
                 machinery_monitored     = ?14, \
                 remarks                 = ?15, \
                 updated_at              = ?16 \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );
        let entry = sqlx::query_as::<_, DiaryEntry>(&query)
            .bind(id)
            .bind(prepared.date)
            .bind(prepared.entry_type.as_str())
            .bind(&prepared.time_start)
            .bind(&prepared.time_end)
            .bind(&prepared.summary)
            .bind(&prepared.position_lat)
            .bind(&prepared.position_lon)
            .bind(prepared.course_over_ground_deg)
            .bind(prepared.speed_over_ground_knots)
            .bind(&prepared.weather_summary)
            .bind(&prepared.role)
            .bind(prepared.steering_minutes)
            .bind(&prepared.machinery_monitored)
            .bind(&prepared.remarks)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(entry)
    }

    /// Find an entry by id.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<DiaryEntry>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM diary_entry WHERE id = ?1");
        let entry = sqlx::query_as::<_, DiaryEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(entry)
    }

    /// List a cadet's entries, newest first (watches within a day by start
    /// time).
    pub async fn list_for_cadet(
        pool: &DbPool,
        cadet_id: &str,
    ) -> Result<Vec<DiaryEntry>, DbError> {
        let query = format!(
            "SELECT {COLUMNS} FROM diary_entry \
             WHERE cadet_id = ?1 ORDER BY date DESC, time_start DESC"
        );
        let entries = sqlx::query_as::<_, DiaryEntry>(&query)
            .bind(cadet_id)
            .fetch_all(pool)
            .await?;
        Ok(entries)
    }

    /// Entry count and summed bridge/engine watch hours for the summary
    /// strip.
    pub async fn watch_totals(pool: &DbPool, cadet_id: &str) -> Result<WatchTotals, DbError> {
        let entries = Self::list_for_cadet(pool, cadet_id).await?;

        let mut bridge_hours = 0.0;
        let mut engine_hours = 0.0;
        for entry in &entries {
            let hours = estimate_hours(entry.time_start.as_deref(), entry.time_end.as_deref());
            match entry.entry_type.as_str() {
                "BRIDGE" => bridge_hours += hours,
                "ENGINE" => engine_hours += hours,
                _ => {}
            }
        }

        Ok(WatchTotals {
            total_entries: entries.len() as i64,
            bridge_hours,
            engine_hours,
        })
    }

    /// Audit trail for one entry, newest first.
    pub async fn list_audit(
        pool: &DbPool,
        diary_entry_id: &str,
    ) -> Result<Vec<DiaryEntryAudit>, DbError> {
        let query = format!(
            "SELECT {AUDIT_COLUMNS} FROM diary_entry_audit \
             WHERE diary_entry_id = ?1 ORDER BY changed_at DESC"
        );
        let rows = sqlx::query_as::<_, DiaryEntryAudit>(&query)
            .bind(diary_entry_id)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    async fn require(pool: &DbPool, id: &str) -> Result<DiaryEntry, DbError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| DbError::NotFound {
                entity: "Diary entry",
                id: id.to_string(),
            })
    }
}

/// Validate and type-filter entry fields.
///
/// Watch entries must carry both times; DAILY entries drop theirs. Bridge
/// position input is encoded to the canonical display string here, so a
/// bounds failure rejects the whole write.
fn prepare_fields(fields: &DiaryEntryFields) -> Result<PreparedEntry, CoreError> {
    if fields.date.trim().is_empty() {
        return Err(CoreError::Validation("Entry date is required.".to_string()));
    }
    let date = parse_calendar_date(&fields.date)?;

    let entry_type = fields.entry_type;
    let time_start = opt_text(&fields.time_start);
    let time_end = opt_text(&fields.time_end);
    if entry_type.is_watch() && (time_start.is_none() || time_end.is_none()) {
        return Err(CoreError::Validation(
            "Watch entries require a start and end time.".to_string(),
        ));
    }
    let (time_start, time_end) = if entry_type.is_watch() {
        (time_start, time_end)
    } else {
        (None, None)
    };

    let is_bridge = entry_type == DiaryEntryType::Bridge;
    let position_lat = match (is_bridge, &fields.latitude) {
        (true, Some(lat)) => Some(encode_latitude(&lat.body, lat.hemisphere)?),
        _ => None,
    };
    let position_lon = match (is_bridge, &fields.longitude) {
        (true, Some(lon)) => Some(encode_longitude(&lon.body, lon.hemisphere)?),
        _ => None,
    };

    Ok(PreparedEntry {
        date,
        entry_type,
        time_start,
        time_end,
        summary: opt_text(&fields.summary),
        position_lat,
        position_lon,
        course_over_ground_deg: is_bridge.then_some(fields.course_over_ground_deg).flatten(),
        speed_over_ground_knots: is_bridge.then_some(fields.speed_over_ground_knots).flatten(),
        weather_summary: if is_bridge {
            opt_text(&fields.weather_summary)
        } else {
            None
        },
        role: if is_bridge { opt_text(&fields.role) } else { None },
        steering_minutes: is_bridge.then_some(fields.steering_minutes).flatten(),
        machinery_monitored: if entry_type == DiaryEntryType::Engine {
            opt_text(&fields.machinery_monitored)
        } else {
            None
        },
        remarks: opt_text(&fields.remarks),
    })
}
