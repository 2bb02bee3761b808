use std::sync::Arc;
use async_trait::async_trait;

use crate::domain::models::academy::{Academy, AcademyStatus, COLLECTION};
use crate::domain::ports::{AcademyRepository, Direction, DocumentStore, Query, SnapshotCallback, Subscription};
use crate::error::AppError;
use super::collection::TenantDocuments;

const NOT_FOUND: &str = "Academy not found";

pub struct DocumentAcademyRepo {
    docs: TenantDocuments<Academy>,
}

impl DocumentAcademyRepo {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { docs: TenantDocuments::new(store, COLLECTION) }
    }
}

#[async_trait]
impl AcademyRepository for DocumentAcademyRepo {
    async fn create(&self, tenant_id: &str, academy: &Academy) -> Result<Academy, AppError> {
        self.docs.put(tenant_id, &academy.id, academy).await?;
        Ok(academy.clone())
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Academy>, AppError> {
        self.docs.get(tenant_id, id).await
    }

    async fn list(&self, tenant_id: &str, status: Option<AcademyStatus>) -> Result<Vec<Academy>, AppError> {
        let mut academies = self.docs.query(tenant_id, &Query::new().order_by("name", Direction::Asc)).await?;
        if let Some(status) = status {
            academies.retain(|a| a.status == status);
        }
        Ok(academies)
    }

    async fn update(&self, tenant_id: &str, academy: &Academy) -> Result<Academy, AppError> {
        self.docs.replace(tenant_id, &academy.id, academy, NOT_FOUND).await?;
        Ok(academy.clone())
    }

    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        self.docs.remove(tenant_id, id, NOT_FOUND).await
    }

    fn watch(&self, tenant_id: &str, callback: SnapshotCallback<Academy>) -> Subscription {
        self.docs.watch(tenant_id, Query::new().order_by("name", Direction::Asc), callback)
    }
}
