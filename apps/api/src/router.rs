use std::sync::Arc;

use axum::{routing::get, Router};

use booking_cell::router::booking_routes;
use doctor_cell::router::doctor_routes;
use payment_cell::router::payment_routes;
use shared_config::AppConfig;
use treatment_cell::router::treatment_routes;
use user_cell::router::user_routes;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    // Cell routers define absolute paths, so they merge rather than nest
    Router::new()
        .route("/", get(|| async { "Doctors server is running" }))
        .merge(treatment_routes(state.clone()))
        .merge(booking_routes(state.clone()))
        .merge(user_routes(state.clone()))
        .merge(doctor_routes(state.clone()))
        .merge(payment_routes(state))
}
