use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn booking_routes(state: Arc<AppConfig>) -> Router {
    // Booking creation is public; reads require a bearer token
    let public_routes = Router::new().route("/booking", post(handlers::create_booking));

    let protected_routes = Router::new()
        .route("/booking", get(handlers::patient_bookings))
        .route("/booking/{id}", get(handlers::booking_by_id))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
