use std::sync::Arc;
use async_trait::async_trait;

use crate::domain::models::availability::{AvailabilityRule, COLLECTION};
use crate::domain::ports::{AvailabilityRepository, Direction, DocumentStore, Filter, Query, SnapshotCallback, Subscription};
use crate::error::AppError;
use super::collection::TenantDocuments;

const NOT_FOUND: &str = "Availability not found";

pub struct DocumentAvailabilityRepo {
    docs: TenantDocuments<AvailabilityRule>,
}

impl DocumentAvailabilityRepo {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { docs: TenantDocuments::new(store, COLLECTION) }
    }
}

fn by_day_then_start(rules: &mut [AvailabilityRule]) {
    rules.sort_by(|a, b| a.day_of_week.cmp(&b.day_of_week).then_with(|| a.start_time.cmp(&b.start_time)));
}

#[async_trait]
impl AvailabilityRepository for DocumentAvailabilityRepo {
    async fn create(&self, tenant_id: &str, rule: &AvailabilityRule) -> Result<AvailabilityRule, AppError> {
        self.docs.put(tenant_id, &rule.id, rule).await?;
        Ok(rule.clone())
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<AvailabilityRule>, AppError> {
        self.docs.get(tenant_id, id).await
    }

    async fn list(&self, tenant_id: &str) -> Result<Vec<AvailabilityRule>, AppError> {
        let mut rules = self.docs.query(tenant_id, &Query::new()).await?;
        by_day_then_start(&mut rules);
        Ok(rules)
    }

    async fn list_active_for_day(&self, tenant_id: &str, day_of_week: u8) -> Result<Vec<AvailabilityRule>, AppError> {
        let query = Query::new()
            .filter(Filter::eq("dayOfWeek", day_of_week))
            .filter(Filter::eq("isActive", true));
        let mut rules = self.docs.query(tenant_id, &query).await?;
        by_day_then_start(&mut rules);
        Ok(rules)
    }

    async fn update(&self, tenant_id: &str, rule: &AvailabilityRule) -> Result<AvailabilityRule, AppError> {
        self.docs.replace(tenant_id, &rule.id, rule, NOT_FOUND).await?;
        Ok(rule.clone())
    }

    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        self.docs.remove(tenant_id, id, NOT_FOUND).await
    }

    fn watch(&self, tenant_id: &str, callback: SnapshotCallback<AvailabilityRule>) -> Subscription {
        self.docs.watch(tenant_id, Query::new().order_by("dayOfWeek", Direction::Asc), callback)
    }
}
