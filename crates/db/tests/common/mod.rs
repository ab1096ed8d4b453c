use trb_db::DbPool;

/// Fresh in-memory database with the full schema applied.
pub async fn test_pool() -> DbPool {
    let pool = trb_db::connect_in_memory()
        .await
        .expect("open in-memory database");
    trb_db::schema::init(&pool).await.expect("create schema");
    pool
}
