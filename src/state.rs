use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::DocumentStore;
use crate::domain::services::scheduler::SchedulingService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub scheduler: Arc<SchedulingService>,
}
