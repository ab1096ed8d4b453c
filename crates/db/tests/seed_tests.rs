//! Bootstrap seeding: every `ensure_*` entry point is idempotent.

use trb_core::session::CadetSession;
use trb_core::stream::CadetStream;
use trb_db::repositories::{DeploymentRepo, TaskRepo, VesselRepo};
use trb_db::seed;

mod common;

const CADET_ID: &str = "cadet-test-001";

#[tokio::test]
async fn template_catalogue_seeds_once() {
    let pool = common::test_pool().await;

    let first = seed::ensure_default_task_templates_seeded(&pool)
        .await
        .expect("first seeding");
    assert!(first > 0);

    let count_after_first = TaskRepo::count_templates(&pool).await.expect("count");
    assert_eq!(count_after_first, first as i64);

    let second = seed::ensure_default_task_templates_seeded(&pool)
        .await
        .expect("second seeding");
    assert_eq!(second, 0);
    assert_eq!(
        TaskRepo::count_templates(&pool).await.expect("count"),
        count_after_first
    );
}

#[tokio::test]
async fn every_stream_gets_a_catalogue() {
    let pool = common::test_pool().await;
    seed::ensure_default_task_templates_seeded(&pool)
        .await
        .expect("seed templates");

    for stream in CadetStream::ALL {
        let templates = TaskRepo::list_templates_for_stream(&pool, stream)
            .await
            .expect("list templates");
        assert!(
            !templates.is_empty(),
            "no templates for {}",
            stream.as_str()
        );
        assert!(templates.iter().all(|t| t.stream == stream.as_str()));
    }
}

#[tokio::test]
async fn progress_rows_seed_once_per_cadet() {
    let pool = common::test_pool().await;
    seed::ensure_default_task_templates_seeded(&pool)
        .await
        .expect("seed templates");

    let session = CadetSession::new(CADET_ID, CadetStream::Deck);
    let deck_templates = TaskRepo::list_templates_for_stream(&pool, CadetStream::Deck)
        .await
        .expect("list templates");

    let first = seed::ensure_progress_rows_seeded(&pool, &session)
        .await
        .expect("first seeding");
    assert_eq!(first as usize, deck_templates.len());

    let second = seed::ensure_progress_rows_seeded(&pool, &session)
        .await
        .expect("second seeding");
    assert_eq!(second, 0);

    let rows = TaskRepo::list_progress_for_cadet(&pool, CADET_ID)
        .await
        .expect("list progress");
    assert_eq!(rows.len(), deck_templates.len());
    assert!(rows.iter().all(|r| r.status == "PENDING"));
    assert!(rows.iter().all(|r| r.last_status_change_at.is_none()));
}

#[tokio::test]
async fn progress_seeding_follows_the_cadet_stream() {
    let pool = common::test_pool().await;
    seed::ensure_default_task_templates_seeded(&pool)
        .await
        .expect("seed templates");

    let session = CadetSession::new("cadet-eto-001", CadetStream::Eto);
    seed::ensure_progress_rows_seeded(&pool, &session)
        .await
        .expect("seed progress");

    let eto_templates = TaskRepo::list_templates_for_stream(&pool, CadetStream::Eto)
        .await
        .expect("list templates");
    let rows = TaskRepo::list_progress_for_cadet(&pool, "cadet-eto-001")
        .await
        .expect("list progress");
    assert_eq!(rows.len(), eto_templates.len());
}

#[tokio::test]
async fn sample_vessel_and_deployment_seed_once() {
    let pool = common::test_pool().await;

    let first = seed::ensure_sample_vessel_and_deployment(&pool, CADET_ID)
        .await
        .expect("first seeding");
    assert!(first);

    let second = seed::ensure_sample_vessel_and_deployment(&pool, CADET_ID)
        .await
        .expect("second seeding");
    assert!(!second);

    let vessels = VesselRepo::list_all(&pool).await.expect("list vessels");
    assert_eq!(vessels.len(), 1);

    let deployments = DeploymentRepo::list_for_cadet(&pool, CADET_ID)
        .await
        .expect("list deployments");
    assert_eq!(deployments.len(), 1);
    assert!(deployments[0].deployment.sign_off_date.is_none());
    assert_eq!(deployments[0].vessel_name.as_deref(), Some("MV Coral Meridian"));
}
