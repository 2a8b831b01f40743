use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::Identity;
use shared_models::error::AppError;

use crate::models::PaymentIntentRequest;
use crate::services::payment::PaymentService;

#[axum::debug_handler]
pub async fn create_payment_intent(
    State(state): State<Arc<AppConfig>>,
    Extension(_identity): Extension<Identity>,
    Json(request): Json<PaymentIntentRequest>,
) -> Result<Json<Value>, AppError> {
    if !state.is_payments_configured() {
        return Err(AppError::ExternalService(
            "Payment processor not configured".to_string(),
        ));
    }

    if request.price <= 0.0 {
        return Err(AppError::BadRequest("Price must be positive".to_string()));
    }

    let payment = PaymentService::new(&state);
    let client_secret = payment
        .create_payment_intent(request.price)
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({ "clientSecret": client_secret })))
}
