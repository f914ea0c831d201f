use mandiwatch::{
    config::Settings,
    errors::StoreError,
    models::{Condition, NewAlert},
    services::{db_init, AlertStore, SqlAlertStore},
};

async fn test_store() -> SqlAlertStore {
    let settings = Settings {
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 4,
        host: "127.0.0.1".to_string(),
        port: 0,
    };

    let pool = db_init::connect(&settings).await.expect("sqlite pool");
    db_init::ensure_schema(&pool).await.expect("alerts table");
    SqlAlertStore::new(pool)
}

fn input(commodity: &str, mandi: &str, price: i64, condition: Condition) -> NewAlert {
    NewAlert::new(commodity, mandi, price, condition).unwrap()
}

#[tokio::test]
async fn empty_table_lists_nothing() {
    let store = test_store().await;
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn created_rows_read_back_unchanged() {
    let store = test_store().await;

    let a = store
        .create(input("wheat", "khanna", 2300, Condition::Above))
        .await
        .unwrap();
    let b = store
        .create(input("mustard", "alwar", -5, Condition::Below))
        .await
        .unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(a.commodity_id, "wheat");
    assert_eq!(b.target_price, -5);
    assert_eq!(b.condition, Condition::Below);

    assert_eq!(store.list().await.unwrap(), vec![a, b]);
}

#[tokio::test]
async fn delete_removes_exactly_one_row() {
    let store = test_store().await;
    let a = store.create(input("wheat", "khanna", 1, Condition::Above)).await.unwrap();
    let b = store.create(input("rice", "karnal", 2, Condition::Below)).await.unwrap();

    assert!(store.delete(a.id).await.unwrap());
    assert_eq!(store.list().await.unwrap(), vec![b.clone()]);

    // second delete is a no-op
    assert!(!store.delete(a.id).await.unwrap());
    assert_eq!(store.list().await.unwrap(), vec![b]);
}

#[tokio::test]
async fn unknown_id_delete_does_not_error() {
    let store = test_store().await;
    store.create(input("onion", "lasalgaon", 1500, Condition::Below)).await.unwrap();

    assert!(!store.delete(12345).await.unwrap());
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn ids_keep_increasing_after_deletes() {
    let store = test_store().await;
    let a = store.create(input("wheat", "khanna", 1, Condition::Above)).await.unwrap();
    store.delete(a.id).await.unwrap();

    let b = store.create(input("wheat", "khanna", 1, Condition::Above)).await.unwrap();
    assert!(b.id > a.id);
}

#[tokio::test]
async fn ensure_schema_is_idempotent() {
    let store = test_store().await;
    store.create(input("wheat", "khanna", 1, Condition::Above)).await.unwrap();

    db_init::ensure_schema(store.pool()).await.unwrap();
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unreadable_condition_is_reported_as_corrupt() {
    let store = test_store().await;

    // Bypass the CHECK constraint to simulate a row written by something else.
    sqlx::query("PRAGMA ignore_check_constraints = ON")
        .execute(store.pool())
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO alerts (commodity_id, mandi_id, target_price, condition, created_at) \
         VALUES ('wheat', 'khanna', 1, 'Sideways', '2024-01-01T00:00:00Z')",
    )
    .execute(store.pool())
    .await
    .unwrap();

    match store.list().await {
        Err(StoreError::Corrupt { reason, .. }) => assert!(reason.contains("Sideways")),
        other => panic!("expected corrupt row error, got {other:?}"),
    }
}

#[tokio::test]
async fn ping_succeeds_on_open_pool() {
    let store = test_store().await;
    store.ping().await.unwrap();
}

#[tokio::test]
async fn ping_fails_once_pool_is_closed() {
    let store = test_store().await;
    store.pool().close().await;
    assert!(store.ping().await.is_err());
}
