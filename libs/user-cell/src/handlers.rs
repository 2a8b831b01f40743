use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::Identity;
use shared_models::error::AppError;
use shared_utils::jwt::issue_token;

use crate::models::{UpsertUserRequest, UserError};
use crate::services::{account::AccountService, authorization::AuthorizationService};

fn map_user_error(err: UserError) -> AppError {
    match err {
        UserError::NotFound => AppError::NotFound("User not found".to_string()),
        UserError::DatabaseError(msg) => AppError::Database(msg),
    }
}

/// Upsert a profile and hand back a fresh bearer token for that identity.
#[axum::debug_handler]
pub async fn upsert_user(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
    Json(request): Json<UpsertUserRequest>,
) -> Result<Json<Value>, AppError> {
    let accounts = AccountService::new(&state);

    let user = accounts
        .upsert_user(&email, request.name)
        .await
        .map_err(map_user_error)?;

    let token = issue_token(&email, &state.jwt_secret).map_err(AppError::Internal)?;

    Ok(Json(json!({ "user": user, "token": token })))
}

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<Arc<AppConfig>>,
    Extension(_identity): Extension<Identity>,
) -> Result<Json<Value>, AppError> {
    let accounts = AccountService::new(&state);

    let users = accounts.list_users().await.map_err(map_user_error)?;

    Ok(Json(json!({ "users": users })))
}

#[axum::debug_handler]
pub async fn is_admin(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let authorization = AuthorizationService::new(&state);

    let admin = authorization
        .is_admin(&email)
        .await
        .map_err(map_user_error)?;

    Ok(Json(json!({ "admin": admin })))
}

#[axum::debug_handler]
pub async fn grant_admin(
    State(state): State<Arc<AppConfig>>,
    Extension(identity): Extension<Identity>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let authorization = AuthorizationService::new(&state);
    authorization.require_admin(&identity).await?;

    let accounts = AccountService::new(&state);
    let user = accounts.grant_admin(&email).await.map_err(map_user_error)?;

    Ok(Json(json!({ "user": user })))
}
