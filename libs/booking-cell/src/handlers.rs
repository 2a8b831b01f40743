use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::Identity;
use shared_models::error::AppError;

use crate::models::{Admission, BookingError, CreateBookingRequest};
use crate::services::{admission::AdmissionService, notification::NotificationService};

#[derive(Debug, Deserialize)]
pub struct BookingQuery {
    pub email: String,
}

fn map_booking_error(err: BookingError) -> AppError {
    match err {
        BookingError::NotFound => AppError::NotFound("Booking not found".to_string()),
        BookingError::DatabaseError(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let admission_service = AdmissionService::new(&state);

    match admission_service.admit(request).await.map_err(map_booking_error)? {
        Admission::Accepted(booking) => {
            // Confirmation email is fire-and-forget; a send failure is logged
            // and never alters the result already committed.
            let notification = NotificationService::new(&state);
            let confirmed = booking.clone();
            tokio::spawn(async move {
                if let Err(e) = notification.send_booking_confirmation(&confirmed).await {
                    error!("Failed to send confirmation for booking {}: {}", confirmed.id, e);
                }
            });

            Ok((StatusCode::CREATED, Json(json!({ "booking": booking }))))
        }
        Admission::Conflict(existing) => Err(AppError::Conflict(
            "A booking for this treatment, date and patient already exists".to_string(),
            json!(existing),
        )),
    }
}

#[axum::debug_handler]
pub async fn patient_bookings(
    State(state): State<Arc<AppConfig>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<BookingQuery>,
) -> Result<Json<Value>, AppError> {
    // A caller may only read bookings under their own identity
    if query.email != identity.email {
        return Err(AppError::Forbidden(
            "Cannot read another patient's bookings".to_string(),
        ));
    }

    let admission_service = AdmissionService::new(&state);
    let bookings = admission_service
        .patient_bookings(&query.email)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({ "bookings": bookings })))
}

#[axum::debug_handler]
pub async fn booking_by_id(
    State(state): State<Arc<AppConfig>>,
    Extension(_identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let admission_service = AdmissionService::new(&state);

    let booking = admission_service
        .get_booking(id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({ "booking": booking })))
}
