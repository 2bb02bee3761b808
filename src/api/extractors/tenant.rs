use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
};
use std::collections::HashMap;
use crate::state::AppState;
use std::sync::Arc;

/// The `{tenant_id}` path segment. Tenants are not looked up; any non-blank
/// id addresses its own isolated set of collections.
pub struct TenantId(pub String);

impl FromRequestParts<Arc<AppState>> for TenantId {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let params: Path<HashMap<String, String>> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;

        let tenant_id = params.get("tenant_id").ok_or(StatusCode::BAD_REQUEST)?;
        if tenant_id.trim().is_empty() || tenant_id.contains('/') {
            return Err(StatusCode::BAD_REQUEST);
        }

        Ok(TenantId(tenant_id.clone()))
    }
}
