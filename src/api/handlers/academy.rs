use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::tenant::TenantId;
use crate::api::dtos::requests::{DeleteAcademyQuery, ListAcademiesQuery};
use crate::domain::models::academy::{AcademyPatch, CourtClient, NewAcademy};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_academy(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<NewAcademy>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.scheduler.create_academy(&tenant_id, payload).await?;
    Ok(Json(created))
}

pub async fn list_academies(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Query(params): Query<ListAcademiesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let academies = match &params.coach_id {
        Some(coach_id) => {
            let mut academies = state.scheduler.academies_for_coach(&tenant_id, coach_id).await?;
            if let Some(status) = params.status {
                academies.retain(|a| a.status == status);
            }
            academies
        }
        None => state.scheduler.list_academies(&tenant_id, params.status).await?,
    };
    Ok(Json(academies))
}

pub async fn get_academy(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, academy_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let academy = state.scheduler.get_academy(&tenant_id, &academy_id).await?;
    Ok(Json(academy))
}

pub async fn update_academy(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, academy_id)): Path<(String, String)>,
    Json(payload): Json<AcademyPatch>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.scheduler.update_academy(&tenant_id, &academy_id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_academy(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, academy_id)): Path<(String, String)>,
    Query(params): Query<DeleteAcademyQuery>,
) -> Result<impl IntoResponse, AppError> {
    let cascade = params.cascade.unwrap_or(true);
    let report = state.scheduler.delete_academy(&tenant_id, &academy_id, cascade).await?;
    Ok(Json(report))
}

/// Materializes the academy schedule again. Every call adds a full new set.
pub async fn generate_appointments(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, academy_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let academy = state.scheduler.get_academy(&tenant_id, &academy_id).await?;
    let outcome = state.scheduler.generate_appointments_from_academy(&tenant_id, &academy).await?;
    info!("Regenerated {} appointments for academy {}", outcome.generated(), academy_id);
    Ok(Json(outcome))
}

pub async fn add_court_client(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, academy_id, court_id)): Path<(String, String, String)>,
    Json(payload): Json<CourtClient>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.scheduler.add_client_to_court(&tenant_id, &academy_id, &court_id, payload).await?;
    Ok(Json(updated))
}

pub async fn remove_court_client(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, academy_id, court_id, client_id)): Path<(String, String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.scheduler.remove_client_from_court(&tenant_id, &academy_id, &court_id, &client_id).await?;
    Ok(Json(updated))
}
