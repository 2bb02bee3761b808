#![allow(dead_code)]

use scheduling_backend::{
    api::router::create_router,
    config::{Config, SchedulingPolicy},
    domain::ports::{Document, DocumentStore, Query},
    error::AppError,
    infra::factory::build_state,
    infra::store::memory_store::MemoryDocumentStore,
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub store: Arc<dyn DocumentStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_policy(SchedulingPolicy::default())
    }

    pub fn with_policy(policy: SchedulingPolicy) -> Self {
        Self::with_store(Arc::new(MemoryDocumentStore::new()), policy)
    }

    pub fn with_store(store: Arc<dyn DocumentStore>, policy: SchedulingPolicy) -> Self {
        let config = Config {
            database_url: "memory://".to_string(),
            port: 0,
            policy,
        };

        let state = Arc::new(build_state(config, store.clone()));
        let router = create_router(state.clone());

        Self { router, state, store }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");

        let request = match body {
            Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        (status, value)
    }

    pub async fn add_rule(&self, tenant: &str, day: u8, start: &str, end: &str, duration: u32) -> Value {
        let (status, body) = self.send(
            "POST",
            &format!("/api/v1/{}/availability", tenant),
            Some(json!({"dayOfWeek": day, "startTime": start, "endTime": end, "duration": duration})),
        ).await;
        assert_eq!(status, StatusCode::OK, "rule creation failed: {}", body);
        body
    }

    /// Opens every weekday from 06:00 to 22:00.
    pub async fn open_all_week(&self, tenant: &str) {
        for day in 0..7 {
            self.add_rule(tenant, day, "06:00", "22:00", 60).await;
        }
    }

    pub async fn book(&self, tenant: &str, payload: Value) -> (StatusCode, Value) {
        self.send("POST", &format!("/api/v1/{}/appointments", tenant), Some(payload)).await
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// First date with the given weekday (0 = Sunday) at least `min_days` from today.
pub fn next_weekday(weekday: u8, min_days: i64) -> NaiveDate {
    let mut date = today() + Duration::days(min_days);
    while date.weekday().num_days_from_sunday() as u8 != weekday {
        date += Duration::days(1);
    }
    date
}

pub fn weekday_of(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn appointment_json(date: NaiveDate, start: &str, duration: u32) -> Value {
    json!({
        "clientId": "client-1",
        "clientName": "Ana",
        "sportType": "tennis",
        "date": date.to_string(),
        "startTime": start,
        "duration": duration
    })
}

/// In-memory store that rejects selected appointment writes and deletes.
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryDocumentStore,
    failing_dates: Mutex<HashSet<String>>,
    failing_deletes: Mutex<HashSet<String>>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes_on(&self, date: NaiveDate) {
        self.failing_dates.lock().unwrap().insert(date.to_string());
    }

    pub fn fail_delete_of(&self, id: &str) {
        self.failing_deletes.lock().unwrap().insert(id.to_string());
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, AppError> {
        self.inner.get(collection, id).await
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, AppError> {
        self.inner.query(collection, query).await
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<(), AppError> {
        let date = data.get("date").and_then(Value::as_str).map(str::to_string);
        let blocked = collection.ends_with("/appointments")
            && date.is_some_and(|d| self.failing_dates.lock().unwrap().contains(&d));
        if blocked {
            return Err(AppError::InternalWithMsg("simulated write failure".into()));
        }
        self.inner.set(collection, id, data).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        if self.failing_deletes.lock().unwrap().contains(id) {
            return Err(AppError::InternalWithMsg("simulated delete failure".into()));
        }
        self.inner.delete(collection, id).await
    }

    fn changes(&self) -> broadcast::Receiver<String> {
        self.inner.changes()
    }
}
