use crate::service::JobsService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobsService>,
}
