use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn user_routes(state: Arc<AppConfig>) -> Router {
    // Upsert issues the token, so it cannot require one; the admin flag
    // lookup is public for client-side menu rendering
    let public_routes = Router::new()
        .route("/users/{email}", put(handlers::upsert_user))
        .route("/admin/{email}", get(handlers::is_admin));

    let protected_routes = Router::new()
        .route("/users", get(handlers::list_users))
        .route("/users/admin/{email}", put(handlers::grant_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
