//! Generic document persistence consumed by the scheduling core.
//!
//! Documents are JSON objects addressed by `(collection path, id)`. Collection
//! paths are tenant scoped (`tenants/{tenant_id}/{entity}`), so a query can
//! never see another tenant's data.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self { field: field.into(), op, value: value.into() }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Gte, value)
    }

    pub fn matches(&self, data: &Value) -> bool {
        let actual = data.get(&self.field).unwrap_or(&Value::Null);
        let ord = compare_values(actual, &self.value);

        match self.op {
            FilterOp::Eq => ord == Some(Ordering::Equal),
            FilterOp::Ne => ord != Some(Ordering::Equal),
            FilterOp::Lt => ord == Some(Ordering::Less),
            FilterOp::Lte => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
            FilterOp::Gt => ord == Some(Ordering::Greater),
            FilterOp::Gte => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Conjunction of filters plus an optional single-field ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Option<OrderBy>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(OrderBy { field: field.into(), direction });
        self
    }

    pub fn matches(&self, data: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(data))
    }

    /// Filters and orders an unordered set of documents. Adapters without
    /// native JSON querying run every query through here.
    pub fn apply(&self, docs: impl IntoIterator<Item = Document>) -> Vec<Document> {
        let mut result: Vec<Document> = docs.into_iter().filter(|d| self.matches(&d.data)).collect();

        if let Some(order) = &self.order {
            result.sort_by(|a, b| {
                let left = a.data.get(&order.field).unwrap_or(&Value::Null);
                let right = b.data.get(&order.field).unwrap_or(&Value::Null);
                let ord = compare_values(left, right).unwrap_or(Ordering::Equal);
                match order.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }

        result
    }
}

/// Orders two JSON scalars of the same kind. Mixed kinds are incomparable.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, AppError>;
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, AppError>;
    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<(), AppError>;
    /// Returns whether a document was removed.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, AppError>;
    /// Stream of collection paths touched by writes on this store.
    fn changes(&self) -> broadcast::Receiver<String>;
}

/// A live query. The callback receives the full result set once on open and
/// again after every write to the watched collection. Closing (or dropping)
/// the subscription stops delivery.
pub struct Subscription {
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn open<F>(store: Arc<dyn DocumentStore>, collection: String, query: Query, mut callback: F) -> Self
    where
        F: FnMut(Vec<Document>) + Send + 'static,
    {
        let mut rx = store.changes();

        let handle = tokio::spawn(async move {
            loop {
                match store.query(&collection, &query).await {
                    Ok(docs) => callback(docs),
                    Err(e) => {
                        warn!("Snapshot query on {} failed: {}", collection, e);
                        callback(Vec::new());
                    }
                }

                loop {
                    match rx.recv().await {
                        Ok(changed) if changed == collection => break,
                        Ok(_) => continue,
                        Err(RecvError::Lagged(skipped)) => {
                            debug!("Subscription on {} lagged by {} changes", collection, skipped);
                            break;
                        }
                        Err(RecvError::Closed) => return,
                    }
                }
            }
        });

        Self { handle: Some(handle) }
    }

    pub fn is_open(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}
