use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::tenant::TenantId;
use crate::api::dtos::requests::{AssignExercisesRequest, ListAppointmentsQuery, SetPaidRequest};
use crate::domain::models::appointment::{AppointmentPatch, NewAppointment};
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<NewAppointment>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.scheduler.create_appointment(&tenant_id, payload).await?;
    Ok(Json(created))
}

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Query(params): Query<ListAppointmentsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = params.into_filter()?;
    let appointments = state.scheduler.list_appointments(&tenant_id, &filter).await?;
    Ok(Json(appointments))
}

pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, appointment_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = state.scheduler.get_appointment(&tenant_id, &appointment_id).await?;
    Ok(Json(appointment))
}

pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, appointment_id)): Path<(String, String)>,
    Json(payload): Json<AppointmentPatch>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.scheduler.update_appointment(&tenant_id, &appointment_id, payload).await?;
    Ok(Json(updated))
}

pub async fn set_paid(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, appointment_id)): Path<(String, String)>,
    Json(payload): Json<SetPaidRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.scheduler.set_paid(&tenant_id, &appointment_id, payload.is_paid).await?;
    Ok(Json(updated))
}

pub async fn assign_exercises(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, appointment_id)): Path<(String, String)>,
    Json(payload): Json<AssignExercisesRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.scheduler.assign_exercises(&tenant_id, &appointment_id, payload.exercise_ids).await?;
    Ok(Json(updated))
}

pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, appointment_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.scheduler.delete_appointment(&tenant_id, &appointment_id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
