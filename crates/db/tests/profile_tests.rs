//! Profile upsert behavior: one row per cadet id, validation before write.

use assert_matches::assert_matches;
use trb_core::error::CoreError;
use trb_core::stream::CadetStream;
use trb_db::models::cadet_profile::SaveCadetProfile;
use trb_db::repositories::ProfileRepo;
use trb_db::DbError;

mod common;

const CADET_ID: &str = "cadet-test-001";

fn sample_profile() -> SaveCadetProfile {
    SaveCadetProfile {
        full_name: "Arun Nair".to_string(),
        date_of_birth: Some("2003-04-15".to_string()),
        stream: CadetStream::Deck,
        discharge_book_no: Some("MUM-123456".to_string()),
        passport_no: None,
        academy_name: Some("National Maritime Academy".to_string()),
        academy_id: None,
        next_of_kin_name: Some("Meera Nair".to_string()),
        next_of_kin_contact: Some("+91 98200 00000".to_string()),
    }
}

async fn profile_count(pool: &trb_db::DbPool) -> i64 {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cadet_profile")
        .fetch_one(pool)
        .await
        .expect("count profiles");
    count.0
}

#[tokio::test]
async fn first_save_creates_exactly_one_row() {
    let pool = common::test_pool().await;

    let saved = ProfileRepo::upsert(&pool, CADET_ID, &sample_profile())
        .await
        .expect("create profile");

    assert_eq!(saved.id, CADET_ID);
    assert_eq!(saved.full_name, "Arun Nair");
    assert_eq!(saved.stream, "DECK");
    assert_eq!(saved.created_at, saved.updated_at);
    assert_eq!(profile_count(&pool).await, 1);
}

#[tokio::test]
async fn second_save_updates_in_place() {
    let pool = common::test_pool().await;

    let first = ProfileRepo::upsert(&pool, CADET_ID, &sample_profile())
        .await
        .expect("create profile");

    let mut edited = sample_profile();
    edited.full_name = "Arun K. Nair".to_string();
    edited.passport_no = Some("Z1234567".to_string());

    let second = ProfileRepo::upsert(&pool, CADET_ID, &edited)
        .await
        .expect("update profile");

    assert_eq!(second.id, first.id);
    assert_eq!(second.full_name, "Arun K. Nair");
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(profile_count(&pool).await, 1);
}

#[tokio::test]
async fn blank_full_name_is_rejected_before_write() {
    let pool = common::test_pool().await;

    let mut input = sample_profile();
    input.full_name = "   ".to_string();

    let result = ProfileRepo::upsert(&pool, CADET_ID, &input).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
    assert_eq!(profile_count(&pool).await, 0);
}

#[tokio::test]
async fn invalid_date_of_birth_is_rejected_before_write() {
    let pool = common::test_pool().await;

    let mut input = sample_profile();
    input.date_of_birth = Some("2003-02-30".to_string());

    let result = ProfileRepo::upsert(&pool, CADET_ID, &input).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
    assert_eq!(profile_count(&pool).await, 0);
}

#[tokio::test]
async fn missing_profile_reads_as_none() {
    let pool = common::test_pool().await;

    let found = ProfileRepo::find_by_id(&pool, "cadet-unknown")
        .await
        .expect("query profile");
    assert!(found.is_none());
}

#[tokio::test]
async fn blank_optional_fields_store_as_null() {
    let pool = common::test_pool().await;

    let mut input = sample_profile();
    input.discharge_book_no = Some("  ".to_string());

    let saved = ProfileRepo::upsert(&pool, CADET_ID, &input)
        .await
        .expect("create profile");
    assert_eq!(saved.discharge_book_no, None);
}
