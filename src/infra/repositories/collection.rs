use std::marker::PhantomData;
use std::sync::Arc;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::domain::models::tenant_collection;
use crate::domain::ports::{Document, DocumentStore, Query, SnapshotCallback, Subscription};
use crate::error::AppError;

/// Typed view over one tenant-scoped collection of a `DocumentStore`.
pub struct TenantDocuments<T> {
    store: Arc<dyn DocumentStore>,
    collection: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TenantDocuments<T>
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    pub fn new(store: Arc<dyn DocumentStore>, collection: &'static str) -> Self {
        Self { store, collection, _marker: PhantomData }
    }

    pub fn path(&self, tenant_id: &str) -> String {
        tenant_collection(tenant_id, self.collection)
    }

    pub async fn get(&self, tenant_id: &str, id: &str) -> Result<Option<T>, AppError> {
        match self.store.get(&self.path(tenant_id), id).await? {
            Some(data) => Ok(Some(serde_json::from_value(data)?)),
            None => Ok(None),
        }
    }

    pub async fn query(&self, tenant_id: &str, query: &Query) -> Result<Vec<T>, AppError> {
        let docs = self.store.query(&self.path(tenant_id), query).await?;
        docs.into_iter()
            .map(|doc| serde_json::from_value(doc.data).map_err(AppError::from))
            .collect()
    }

    pub async fn put(&self, tenant_id: &str, id: &str, item: &T) -> Result<(), AppError> {
        self.store.set(&self.path(tenant_id), id, serde_json::to_value(item)?).await
    }

    /// Overwrites an existing document; `not_found` is the error message when absent.
    pub async fn replace(&self, tenant_id: &str, id: &str, item: &T, not_found: &str) -> Result<(), AppError> {
        let path = self.path(tenant_id);
        if self.store.get(&path, id).await?.is_none() {
            return Err(AppError::NotFound(not_found.to_string()));
        }
        self.store.set(&path, id, serde_json::to_value(item)?).await
    }

    pub async fn remove(&self, tenant_id: &str, id: &str, not_found: &str) -> Result<(), AppError> {
        if !self.store.delete(&self.path(tenant_id), id).await? {
            return Err(AppError::NotFound(not_found.to_string()));
        }
        Ok(())
    }

    /// Live query. Documents that no longer decode are skipped with a warning.
    pub fn watch(&self, tenant_id: &str, query: Query, mut callback: SnapshotCallback<T>) -> Subscription {
        let path = self.path(tenant_id);
        let label = path.clone();

        Subscription::open(self.store.clone(), path, query, move |docs: Vec<Document>| {
            let items = docs
                .into_iter()
                .filter_map(|doc| match serde_json::from_value::<T>(doc.data) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        warn!("Skipping undecodable document {} in {}: {}", doc.id, label, e);
                        None
                    }
                })
                .collect();
            callback(items);
        })
    }
}
