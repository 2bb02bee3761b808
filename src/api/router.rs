use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{academy, appointment, availability, health, series};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Appointments
        .route("/api/v1/{tenant_id}/appointments", post(appointment::create_appointment).get(appointment::list_appointments))
        .route("/api/v1/{tenant_id}/appointments/{appointment_id}", get(appointment::get_appointment).put(appointment::update_appointment).delete(appointment::delete_appointment))
        .route("/api/v1/{tenant_id}/appointments/{appointment_id}/paid", put(appointment::set_paid))
        .route("/api/v1/{tenant_id}/appointments/{appointment_id}/exercises", put(appointment::assign_exercises))

        // Recurring series
        .route("/api/v1/{tenant_id}/series", post(series::create_series))
        .route("/api/v1/{tenant_id}/series/{group_id}", delete(series::cancel_series))

        // Academies
        .route("/api/v1/{tenant_id}/academies", post(academy::create_academy).get(academy::list_academies))
        .route("/api/v1/{tenant_id}/academies/{academy_id}", get(academy::get_academy).put(academy::update_academy).delete(academy::delete_academy))
        .route("/api/v1/{tenant_id}/academies/{academy_id}/generate", post(academy::generate_appointments))
        .route("/api/v1/{tenant_id}/academies/{academy_id}/courts/{court_id}/clients", post(academy::add_court_client))
        .route("/api/v1/{tenant_id}/academies/{academy_id}/courts/{court_id}/clients/{client_id}", delete(academy::remove_court_client))

        // Availability
        .route("/api/v1/{tenant_id}/availability", post(availability::add_availability).get(availability::list_availability))
        .route("/api/v1/{tenant_id}/availability/{rule_id}", put(availability::update_availability).delete(availability::delete_availability))
        .route("/api/v1/{tenant_id}/availability/{rule_id}/deactivate", post(availability::deactivate_availability))
        .route("/api/v1/{tenant_id}/slots", get(availability::get_slots))
        .route("/api/v1/{tenant_id}/slots/check", get(availability::check_slot))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
