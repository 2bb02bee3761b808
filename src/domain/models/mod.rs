pub mod academy;
pub mod appointment;
pub mod availability;

/// Path of a tenant-scoped collection, e.g. `tenants/{tenant_id}/appointments`.
pub fn tenant_collection(tenant_id: &str, collection: &str) -> String {
    format!("tenants/{}/{}", tenant_id, collection)
}
