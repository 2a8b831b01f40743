use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::Identity;
use shared_models::error::AppError;
use user_cell::services::authorization::AuthorizationService;

use crate::models::{CreateDoctorRequest, DoctorError};
use crate::services::doctor::DoctorService;

fn map_doctor_error(err: DoctorError) -> AppError {
    match err {
        DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        DoctorError::DatabaseError(msg) => AppError::Database(msg),
    }
}

// Every doctor route is admin-only

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppConfig>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Value>, AppError> {
    AuthorizationService::new(&state).require_admin(&identity).await?;

    let doctors = DoctorService::new(&state)
        .list_doctors()
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!({ "doctors": doctors })))
}

#[axum::debug_handler]
pub async fn add_doctor(
    State(state): State<Arc<AppConfig>>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    AuthorizationService::new(&state).require_admin(&identity).await?;

    let doctor = DoctorService::new(&state)
        .add_doctor(request)
        .await
        .map_err(map_doctor_error)?;

    Ok((StatusCode::CREATED, Json(json!({ "doctor": doctor }))))
}

#[axum::debug_handler]
pub async fn remove_doctor(
    State(state): State<Arc<AppConfig>>,
    Extension(identity): Extension<Identity>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    AuthorizationService::new(&state).require_admin(&identity).await?;

    let doctor = DoctorService::new(&state)
        .remove_doctor(&email)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!({ "doctor": doctor })))
}
