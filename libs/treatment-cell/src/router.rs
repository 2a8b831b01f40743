use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn treatment_routes(state: Arc<AppConfig>) -> Router {
    // Both routes are public
    Router::new()
        .route("/service", get(handlers::list_services))
        .route("/available", get(handlers::available_slots))
        .with_state(state)
}
