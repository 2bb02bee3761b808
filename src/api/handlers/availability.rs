use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::tenant::TenantId;
use crate::api::dtos::requests::{SlotCheckQuery, SlotsQuery};
use crate::api::dtos::responses::{SlotCheckResponse, SlotsResponse};
use crate::domain::models::availability::{AvailabilityPatch, NewAvailabilityRule};
use crate::domain::services::time_window::parse_date;
use crate::error::AppError;
use std::sync::Arc;

pub async fn add_availability(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<NewAvailabilityRule>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.scheduler.add_availability(&tenant_id, payload).await?;
    Ok(Json(created))
}

pub async fn list_availability(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
) -> Result<impl IntoResponse, AppError> {
    let rules = state.scheduler.list_availability(&tenant_id).await?;
    Ok(Json(rules))
}

pub async fn update_availability(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, rule_id)): Path<(String, String)>,
    Json(payload): Json<AvailabilityPatch>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.scheduler.update_availability(&tenant_id, &rule_id, payload).await?;
    Ok(Json(updated))
}

pub async fn deactivate_availability(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, rule_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.scheduler.deactivate_availability(&tenant_id, &rule_id).await?;
    Ok(Json(updated))
}

pub async fn delete_availability(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, rule_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.scheduler.delete_availability(&tenant_id, &rule_id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Query(params): Query<SlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&params.date)?;
    let slots = state.scheduler.bookable_slots(&tenant_id, date, params.instructor_id.as_deref()).await?;
    Ok(Json(SlotsResponse { date: date.to_string(), slots }))
}

pub async fn check_slot(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Query(params): Query<SlotCheckQuery>,
) -> Result<impl IntoResponse, AppError> {
    let available = state.scheduler
        .is_time_slot_available(&tenant_id, params.day, &params.start, &params.end)
        .await?;

    Ok(Json(SlotCheckResponse {
        day: params.day,
        start: params.start,
        end: params.end,
        available,
    }))
}
