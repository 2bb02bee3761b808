use scheduling_backend::domain::ports::{Direction, DocumentStore, Filter, Query};
use scheduling_backend::infra::store::sqlite_store::SqliteDocumentStore;
use serde_json::json;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use uuid::Uuid;

struct TempDb {
    filename: String,
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.filename);
    }
}

async fn sqlite_store() -> (SqliteDocumentStore, TempDb) {
    let filename = format!("test_{}.db", Uuid::new_v4());
    let opts = SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", filename))
        .unwrap()
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .connect_with(opts)
        .await
        .expect("Failed to connect to test db");

    sqlx::migrate!("./migrations/sqlite")
        .run(&pool)
        .await
        .expect("Failed to migrate test db");

    (SqliteDocumentStore::new(pool), TempDb { filename })
}

#[tokio::test]
async fn test_sqlite_store_round_trip() {
    let (store, _db) = sqlite_store().await;
    let path = "tenants/t1/appointments";
    let mut changes = store.changes();

    store.set(path, "b", json!({"date": "2030-01-02", "startTime": "10:00"})).await.unwrap();
    store.set(path, "a", json!({"date": "2030-01-01", "startTime": "09:00"})).await.unwrap();
    store.set("tenants/t2/appointments", "c", json!({"date": "2030-01-01"})).await.unwrap();
    assert_eq!(changes.recv().await.unwrap(), path);

    let all = store.query(path, &Query::new().order_by("date", Direction::Asc)).await.unwrap();
    let ids: Vec<&str> = all.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);

    let later = store.query(path, &Query::new().filter(Filter::gte("date", "2030-01-02"))).await.unwrap();
    assert_eq!(later.len(), 1);

    store.set(path, "a", json!({"date": "2030-02-01"})).await.unwrap();
    assert_eq!(store.get(path, "a").await.unwrap().unwrap()["date"], "2030-02-01");

    assert!(store.delete(path, "a").await.unwrap());
    assert!(!store.delete(path, "a").await.unwrap());
    assert!(store.get(path, "a").await.unwrap().is_none());
}
