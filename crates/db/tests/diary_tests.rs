//! Diary entries: type-specific field handling, canonical positions, watch
//! totals, and the audited update.

use assert_matches::assert_matches;
use trb_core::error::CoreError;
use trb_core::position::{LatHemisphere, LonHemisphere};
use trb_core::watch::DiaryEntryType;
use trb_db::models::diary::{
    CreateDiaryEntry, DiaryEntry, DiaryEntryFields, LatitudeInput, LongitudeInput,
};
use trb_db::repositories::{diary_repo::CHANGE_TYPE_UPDATE, DiaryRepo};
use trb_db::{DbError, DbPool};

mod common;

const CADET_ID: &str = "cadet-test-001";

fn daily_fields(date: &str, summary: &str) -> DiaryEntryFields {
    DiaryEntryFields {
        date: date.to_string(),
        entry_type: DiaryEntryType::Daily,
        time_start: None,
        time_end: None,
        summary: Some(summary.to_string()),
        latitude: None,
        longitude: None,
        course_over_ground_deg: None,
        speed_over_ground_knots: None,
        weather_summary: None,
        role: None,
        steering_minutes: None,
        machinery_monitored: None,
        remarks: None,
    }
}

fn bridge_fields(date: &str, start: &str, end: &str) -> DiaryEntryFields {
    DiaryEntryFields {
        entry_type: DiaryEntryType::Bridge,
        time_start: Some(start.to_string()),
        time_end: Some(end.to_string()),
        latitude: Some(LatitudeInput {
            body: "0115.0".to_string(),
            hemisphere: LatHemisphere::North,
        }),
        longitude: Some(LongitudeInput {
            body: "10345.0".to_string(),
            hemisphere: LonHemisphere::East,
        }),
        course_over_ground_deg: Some(245.0),
        speed_over_ground_knots: Some(14.5),
        weather_summary: Some("NE'ly swell, good visibility".to_string()),
        role: Some("On wheel".to_string()),
        steering_minutes: Some(30),
        ..daily_fields(date, "Bridge watch 4-8")
    }
}

fn engine_fields(date: &str, start: &str, end: &str) -> DiaryEntryFields {
    DiaryEntryFields {
        entry_type: DiaryEntryType::Engine,
        time_start: Some(start.to_string()),
        time_end: Some(end.to_string()),
        machinery_monitored: Some("ME lube oil system, DG #2, boiler".to_string()),
        ..daily_fields(date, "Engine room watch")
    }
}

fn create(fields: DiaryEntryFields) -> CreateDiaryEntry {
    CreateDiaryEntry {
        cadet_id: CADET_ID.to_string(),
        deployment_id: None,
        fields,
    }
}

async fn entry_count(pool: &DbPool) -> i64 {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM diary_entry")
        .fetch_one(pool)
        .await
        .expect("count entries");
    count.0
}

#[tokio::test]
async fn daily_entry_drops_time_range() {
    let pool = common::test_pool().await;

    let mut fields = daily_fields("2024-03-05", "Chart corrections with 3/O.");
    fields.time_start = Some("08:00".to_string());
    fields.time_end = Some("12:00".to_string());

    let entry = DiaryRepo::insert(&pool, &create(fields)).await.expect("insert");
    assert_eq!(entry.entry_type, "DAILY");
    assert_eq!(entry.time_start, None);
    assert_eq!(entry.time_end, None);
}

#[tokio::test]
async fn watch_entry_without_times_is_rejected() {
    let pool = common::test_pool().await;

    let mut fields = bridge_fields("2024-03-05", "04:00", "08:00");
    fields.time_end = None;

    let result = DiaryRepo::insert(&pool, &create(fields)).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
    assert_eq!(entry_count(&pool).await, 0);
}

#[tokio::test]
async fn bridge_entry_persists_canonical_position() {
    let pool = common::test_pool().await;

    let entry = DiaryRepo::insert(&pool, &create(bridge_fields("2024-03-05", "04:00", "08:00")))
        .await
        .expect("insert");

    assert_eq!(entry.position_lat.as_deref(), Some("01°15.0'N"));
    assert_eq!(entry.position_lon.as_deref(), Some("103°45.0'E"));
    assert_eq!(entry.steering_minutes, Some(30));
}

#[tokio::test]
async fn out_of_bounds_latitude_rejects_whole_entry() {
    let pool = common::test_pool().await;

    let mut fields = bridge_fields("2024-03-05", "04:00", "08:00");
    fields.latitude = Some(LatitudeInput {
        body: "9515.0".to_string(),
        hemisphere: LatHemisphere::North,
    });

    let result = DiaryRepo::insert(&pool, &create(fields)).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
    assert_eq!(entry_count(&pool).await, 0);
}

#[tokio::test]
async fn engine_entry_keeps_machinery_and_drops_bridge_fields() {
    let pool = common::test_pool().await;

    let mut fields = engine_fields("2024-03-05", "00:00", "04:00");
    fields.weather_summary = Some("n/a".to_string());
    fields.steering_minutes = Some(10);

    let entry = DiaryRepo::insert(&pool, &create(fields)).await.expect("insert");
    assert_eq!(
        entry.machinery_monitored.as_deref(),
        Some("ME lube oil system, DG #2, boiler")
    );
    assert_eq!(entry.weather_summary, None);
    assert_eq!(entry.steering_minutes, None);
    assert_eq!(entry.position_lat, None);
}

#[tokio::test]
async fn update_snapshots_prior_state_in_audit() {
    let pool = common::test_pool().await;

    let entry = DiaryRepo::insert(
        &pool,
        &create(daily_fields("2024-03-05", "Original summary.")),
    )
    .await
    .expect("insert");

    let updated = DiaryRepo::update(
        &pool,
        &entry.id,
        &daily_fields("2024-03-05", "Corrected summary."),
    )
    .await
    .expect("update");
    assert_eq!(updated.summary.as_deref(), Some("Corrected summary."));

    let audit = DiaryRepo::list_audit(&pool, &entry.id).await.expect("audit");
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].change_type, CHANGE_TYPE_UPDATE);
    assert_eq!(audit[0].cadet_id.as_deref(), Some(CADET_ID));

    let snapshot: DiaryEntry =
        serde_json::from_str(&audit[0].snapshot_json).expect("snapshot parses");
    assert_eq!(snapshot.id, entry.id);
    assert_eq!(snapshot.summary.as_deref(), Some("Original summary."));
}

#[tokio::test]
async fn every_update_appends_another_snapshot() {
    let pool = common::test_pool().await;

    let entry = DiaryRepo::insert(&pool, &create(daily_fields("2024-03-05", "v1")))
        .await
        .expect("insert");
    DiaryRepo::update(&pool, &entry.id, &daily_fields("2024-03-05", "v2"))
        .await
        .expect("first update");
    DiaryRepo::update(&pool, &entry.id, &daily_fields("2024-03-05", "v3"))
        .await
        .expect("second update");

    let audit = DiaryRepo::list_audit(&pool, &entry.id).await.expect("audit");
    assert_eq!(audit.len(), 2);
}

#[tokio::test]
async fn invalid_update_leaves_entry_and_audit_untouched() {
    let pool = common::test_pool().await;

    let entry = DiaryRepo::insert(&pool, &create(daily_fields("2024-03-05", "Original.")))
        .await
        .expect("insert");

    let mut bad = bridge_fields("2024-03-05", "04:00", "08:00");
    bad.longitude = Some(LongitudeInput {
        body: "18145.0".to_string(),
        hemisphere: LonHemisphere::East,
    });

    let result = DiaryRepo::update(&pool, &entry.id, &bad).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));

    let unchanged = DiaryRepo::find_by_id(&pool, &entry.id)
        .await
        .expect("read back")
        .expect("still there");
    assert_eq!(unchanged.summary.as_deref(), Some("Original."));

    let audit = DiaryRepo::list_audit(&pool, &entry.id).await.expect("audit");
    assert!(audit.is_empty());
}

#[tokio::test]
async fn update_of_unknown_entry_is_not_found() {
    let pool = common::test_pool().await;

    let result = DiaryRepo::update(&pool, "diary-missing", &daily_fields("2024-03-05", "x")).await;
    assert_matches!(result, Err(DbError::NotFound { .. }));
}

#[tokio::test]
async fn watch_totals_sum_per_watch_kind_with_rollover() {
    let pool = common::test_pool().await;

    // Bridge watch across midnight, engine morning watch, plus a daily entry
    // that must not contribute hours.
    DiaryRepo::insert(&pool, &create(bridge_fields("2024-03-05", "22:00", "02:00")))
        .await
        .expect("bridge entry");
    DiaryRepo::insert(&pool, &create(engine_fields("2024-03-06", "04:00", "08:00")))
        .await
        .expect("engine entry");
    DiaryRepo::insert(&pool, &create(daily_fields("2024-03-06", "Day work on deck.")))
        .await
        .expect("daily entry");

    let totals = DiaryRepo::watch_totals(&pool, CADET_ID).await.expect("totals");
    assert_eq!(totals.total_entries, 3);
    assert_eq!(totals.bridge_hours, 4.0);
    assert_eq!(totals.engine_hours, 4.0);
}
