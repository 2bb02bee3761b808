use std::collections::{BTreeMap, HashMap};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{broadcast, RwLock};

use crate::domain::ports::{Document, DocumentStore, Query};
use crate::error::AppError;
use super::ChangeFeed;

/// Process-local store used by tests and `DATABASE_URL=memory://`.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
    feed: ChangeFeed,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|docs| docs.get(id)).cloned())
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, AppError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let all = docs.iter().map(|(id, data)| Document { id: id.clone(), data: data.clone() });
        Ok(query.apply(all))
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<(), AppError> {
        {
            let mut collections = self.collections.write().await;
            collections.entry(collection.to_string()).or_default().insert(id.to_string(), data);
        }
        self.feed.publish(collection);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        let removed = {
            let mut collections = self.collections.write().await;
            collections.get_mut(collection).and_then(|docs| docs.remove(id)).is_some()
        };

        if removed {
            self.feed.publish(collection);
        }
        Ok(removed)
    }

    fn changes(&self) -> broadcast::Receiver<String> {
        self.feed.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::Filter;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_get_and_delete() {
        let store = MemoryDocumentStore::new();
        store.set("tenants/t1/appointments", "a1", json!({"date": "2030-01-01"})).await.unwrap();

        assert!(store.get("tenants/t1/appointments", "a1").await.unwrap().is_some());
        assert!(store.get("tenants/t2/appointments", "a1").await.unwrap().is_none());

        assert!(store.delete("tenants/t1/appointments", "a1").await.unwrap());
        assert!(!store.delete("tenants/t1/appointments", "a1").await.unwrap());
    }

    #[tokio::test]
    async fn test_query_is_scoped_to_collection() {
        let store = MemoryDocumentStore::new();
        store.set("tenants/t1/availability", "r1", json!({"dayOfWeek": 1})).await.unwrap();
        store.set("tenants/t2/availability", "r2", json!({"dayOfWeek": 1})).await.unwrap();

        let docs = store
            .query("tenants/t1/availability", &Query::new().filter(Filter::eq("dayOfWeek", 1)))
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "r1");
    }

    #[tokio::test]
    async fn test_writes_are_announced() {
        let store = MemoryDocumentStore::new();
        let mut rx = store.changes();

        store.set("tenants/t1/academies", "x", json!({})).await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), "tenants/t1/academies");
    }
}
