use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::services::{availability::AvailabilityService, catalog::CatalogService};

#[derive(Debug, Deserialize)]
pub struct AvailableQuery {
    pub date: String,
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let catalog = CatalogService::new(&state);

    let services = catalog
        .list_treatment_names()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!({ "services": services })))
}

#[axum::debug_handler]
pub async fn available_slots(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<AvailableQuery>,
) -> Result<Json<Value>, AppError> {
    let availability = AvailabilityService::new(&state);

    let treatments = availability
        .available_treatments(&query.date)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!({
        "date": query.date,
        "treatments": treatments
    })))
}
