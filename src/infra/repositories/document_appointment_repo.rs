use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::models::appointment::{Appointment, AppointmentFilter, COLLECTION};
use crate::domain::ports::{AppointmentRepository, Direction, DocumentStore, Filter, Query, SnapshotCallback, Subscription};
use crate::error::AppError;
use super::collection::TenantDocuments;

const NOT_FOUND: &str = "Appointment not found";

pub struct DocumentAppointmentRepo {
    docs: TenantDocuments<Appointment>,
}

impl DocumentAppointmentRepo {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { docs: TenantDocuments::new(store, COLLECTION) }
    }

    async fn fetch(&self, tenant_id: &str, query: Query) -> Result<Vec<Appointment>, AppError> {
        let mut appointments = self.docs.query(tenant_id, &query).await?;
        appointments.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.start_time.cmp(&b.start_time)));
        Ok(appointments)
    }
}

fn filter_query(filter: &AppointmentFilter) -> Query {
    let mut query = Query::new();
    if let Some(date) = filter.date {
        query = query.filter(Filter::eq("date", date.to_string()));
    }
    if let Some(client_id) = &filter.client_id {
        query = query.filter(Filter::eq("clientId", client_id.as_str()));
    }
    if let Some(academy_id) = &filter.academy_id {
        query = query.filter(Filter::eq("academyId", academy_id.as_str()));
    }
    if let Some(group_id) = &filter.recurring_group_id {
        query = query.filter(Filter::eq("recurringGroupId", group_id.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(Filter::eq("status", status.as_str()));
    }
    query.order_by("date", Direction::Asc)
}

#[async_trait]
impl AppointmentRepository for DocumentAppointmentRepo {
    async fn create(&self, tenant_id: &str, appointment: &Appointment) -> Result<Appointment, AppError> {
        self.docs.put(tenant_id, &appointment.id, appointment).await?;
        Ok(appointment.clone())
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Appointment>, AppError> {
        self.docs.get(tenant_id, id).await
    }

    async fn list(&self, tenant_id: &str, filter: &AppointmentFilter) -> Result<Vec<Appointment>, AppError> {
        self.fetch(tenant_id, filter_query(filter)).await
    }

    async fn list_by_date(&self, tenant_id: &str, date: NaiveDate) -> Result<Vec<Appointment>, AppError> {
        self.fetch(tenant_id, Query::new().filter(Filter::eq("date", date.to_string()))).await
    }

    async fn list_by_academy_from(&self, tenant_id: &str, academy_id: &str, from: NaiveDate) -> Result<Vec<Appointment>, AppError> {
        let query = Query::new()
            .filter(Filter::eq("academyId", academy_id))
            .filter(Filter::gte("date", from.to_string()));
        self.fetch(tenant_id, query).await
    }

    async fn list_by_group_from(&self, tenant_id: &str, group_id: &str, from: NaiveDate) -> Result<Vec<Appointment>, AppError> {
        let query = Query::new()
            .filter(Filter::eq("recurringGroupId", group_id))
            .filter(Filter::gte("date", from.to_string()));
        self.fetch(tenant_id, query).await
    }

    async fn update(&self, tenant_id: &str, appointment: &Appointment) -> Result<Appointment, AppError> {
        self.docs.replace(tenant_id, &appointment.id, appointment, NOT_FOUND).await?;
        Ok(appointment.clone())
    }

    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        self.docs.remove(tenant_id, id, NOT_FOUND).await
    }

    fn watch(&self, tenant_id: &str, filter: &AppointmentFilter, callback: SnapshotCallback<Appointment>) -> Subscription {
        self.docs.watch(tenant_id, filter_query(filter), callback)
    }
}
