use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::SqlitePool;
use tokio::sync::broadcast;

use crate::domain::ports::{Document, DocumentStore, Query};
use crate::error::AppError;
use super::ChangeFeed;

/// Documents stored as JSON text in a single `documents` table. Filtering and
/// ordering run in process after loading the collection.
pub struct SqliteDocumentStore {
    pool: SqlitePool,
    feed: ChangeFeed,
}

impl SqliteDocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, feed: ChangeFeed::new() }
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, AppError> {
        let row = sqlx::query_scalar::<_, String>(
            "SELECT data FROM documents WHERE collection = ? AND id = ?"
        )
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(row.map(|data| serde_json::from_str(&data)).transpose()?)
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, AppError> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT id, data FROM documents WHERE collection = ?"
        )
            .bind(collection)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let mut docs = Vec::with_capacity(rows.len());
        for (id, data) in rows {
            docs.push(Document { id, data: serde_json::from_str(&data)? });
        }
        Ok(query.apply(docs))
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO documents (collection, id, data, updated_at) VALUES (?, ?, ?, ?) \
             ON CONFLICT (collection, id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at"
        )
            .bind(collection)
            .bind(id)
            .bind(data.to_string())
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        self.feed.publish(collection);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let removed = result.rows_affected() > 0;
        if removed {
            self.feed.publish(collection);
        }
        Ok(removed)
    }

    fn changes(&self) -> broadcast::Receiver<String> {
        self.feed.subscribe()
    }
}
