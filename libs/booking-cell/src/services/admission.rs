use serde_json::{json, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Admission, Booking, BookingError, CreateBookingRequest};

/// Columns the store enforces uniqueness on. One booking per patient per
/// treatment per day, whatever the slot.
const BOOKING_IDENTITY_COLUMNS: &str = "treatment,date,patient_email";

pub struct AdmissionService {
    supabase: SupabaseClient,
}

impl AdmissionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Accept or reject a prospective booking. The insert is conditional on
    /// the (treatment, date, patient) triple at the storage layer, so two
    /// concurrent submissions of the same triple cannot both land.
    pub async fn admit(&self, request: CreateBookingRequest) -> Result<Admission, BookingError> {
        debug!(
            "Admission check for {} / {} / {}",
            request.treatment, request.date, request.patient_email
        );

        let row = json!({
            "id": Uuid::new_v4(),
            "treatment": request.treatment,
            "date": request.date,
            "slot": request.slot,
            "patient_email": request.patient_email,
            "patient_name": request.patient_name,
        });

        let inserted = self
            .supabase
            .insert_unique("bookings", BOOKING_IDENTITY_COLUMNS, row)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        match inserted {
            Some(value) => {
                let booking: Booking = serde_json::from_value(value)
                    .map_err(|e| BookingError::DatabaseError(format!("Failed to parse booking: {}", e)))?;
                info!("Booking {} accepted for {}", booking.id, booking.patient_email);
                Ok(Admission::Accepted(booking))
            }
            None => {
                warn!(
                    "Duplicate booking rejected for {} / {} / {}",
                    request.treatment, request.date, request.patient_email
                );
                let existing = self
                    .find_existing(&request.treatment, &request.date, &request.patient_email)
                    .await?;
                Ok(Admission::Conflict(existing))
            }
        }
    }

    /// All bookings belonging to one patient.
    pub async fn patient_bookings(&self, email: &str) -> Result<Vec<Booking>, BookingError> {
        let query = format!("patient_email=eq.{}", urlencoding::encode(email));
        let rows = self
            .supabase
            .select("bookings", &query)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Booking>, _>>()
            .map_err(|e| BookingError::DatabaseError(format!("Failed to parse bookings: {}", e)))
    }

    pub async fn get_booking(&self, id: Uuid) -> Result<Booking, BookingError> {
        let query = format!("id=eq.{}", id);
        let rows = self
            .supabase
            .select("bookings", &query)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        let row = rows.into_iter().next().ok_or(BookingError::NotFound)?;

        serde_json::from_value(row)
            .map_err(|e| BookingError::DatabaseError(format!("Failed to parse booking: {}", e)))
    }

    async fn find_existing(
        &self,
        treatment: &str,
        date: &str,
        patient_email: &str,
    ) -> Result<Booking, BookingError> {
        let query = format!(
            "treatment=eq.{}&date=eq.{}&patient_email=eq.{}",
            urlencoding::encode(treatment),
            urlencoding::encode(date),
            urlencoding::encode(patient_email)
        );

        let rows: Vec<Value> = self
            .supabase
            .select("bookings", &query)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        let row = rows.into_iter().next().ok_or_else(|| {
            BookingError::DatabaseError("Duplicate reported but conflicting row not found".to_string())
        })?;

        serde_json::from_value(row)
            .map_err(|e| BookingError::DatabaseError(format!("Failed to parse booking: {}", e)))
    }
}
