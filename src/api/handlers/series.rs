use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::tenant::TenantId;
use crate::api::dtos::requests::CancelSeriesQuery;
use crate::domain::models::appointment::NewRecurringSeries;
use crate::domain::services::time_window::parse_date;
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_series(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<NewRecurringSeries>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.scheduler.create_recurring_series(&tenant_id, payload).await?;
    Ok(Json(created))
}

pub async fn cancel_series(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, group_id)): Path<(String, String)>,
    Query(params): Query<CancelSeriesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let from = params.from.as_deref().map(parse_date).transpose()?;
    let report = state.scheduler.cancel_recurring_series(&tenant_id, &group_id, from).await?;
    Ok(Json(report))
}
