pub mod document_store;

pub use document_store::{Direction, Document, DocumentStore, Filter, FilterOp, OrderBy, Query, Subscription};

use crate::domain::models::{
    academy::{Academy, AcademyStatus},
    appointment::{Appointment, AppointmentFilter},
    availability::AvailabilityRule,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

pub type SnapshotCallback<T> = Box<dyn FnMut(Vec<T>) + Send + 'static>;

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn create(&self, tenant_id: &str, appointment: &Appointment) -> Result<Appointment, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Appointment>, AppError>;
    async fn list(&self, tenant_id: &str, filter: &AppointmentFilter) -> Result<Vec<Appointment>, AppError>;
    async fn list_by_date(&self, tenant_id: &str, date: NaiveDate) -> Result<Vec<Appointment>, AppError>;
    async fn list_by_academy_from(&self, tenant_id: &str, academy_id: &str, from: NaiveDate) -> Result<Vec<Appointment>, AppError>;
    async fn list_by_group_from(&self, tenant_id: &str, group_id: &str, from: NaiveDate) -> Result<Vec<Appointment>, AppError>;
    async fn update(&self, tenant_id: &str, appointment: &Appointment) -> Result<Appointment, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
    fn watch(&self, tenant_id: &str, filter: &AppointmentFilter, callback: SnapshotCallback<Appointment>) -> Subscription;
}

#[async_trait]
pub trait AcademyRepository: Send + Sync {
    async fn create(&self, tenant_id: &str, academy: &Academy) -> Result<Academy, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Academy>, AppError>;
    async fn list(&self, tenant_id: &str, status: Option<AcademyStatus>) -> Result<Vec<Academy>, AppError>;
    async fn update(&self, tenant_id: &str, academy: &Academy) -> Result<Academy, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
    fn watch(&self, tenant_id: &str, callback: SnapshotCallback<Academy>) -> Subscription;
}

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn create(&self, tenant_id: &str, rule: &AvailabilityRule) -> Result<AvailabilityRule, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<AvailabilityRule>, AppError>;
    async fn list(&self, tenant_id: &str) -> Result<Vec<AvailabilityRule>, AppError>;
    async fn list_active_for_day(&self, tenant_id: &str, day_of_week: u8) -> Result<Vec<AvailabilityRule>, AppError>;
    async fn update(&self, tenant_id: &str, rule: &AvailabilityRule) -> Result<AvailabilityRule, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
    fn watch(&self, tenant_id: &str, callback: SnapshotCallback<AvailabilityRule>) -> Subscription;
}
