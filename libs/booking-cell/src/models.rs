use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A stored appointment booking. `date` is the calendar day in the site's
/// fixed display format (e.g. "May 12, 2022") and is only ever compared by
/// string equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub treatment: String,
    pub date: String,
    pub slot: String,
    pub patient_email: String,
    pub patient_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub treatment: String,
    pub date: String,
    pub slot: String,
    pub patient_email: String,
    pub patient_name: String,
}

/// Outcome of the admission check. A conflict carries the record that
/// already holds the (treatment, date, patient) triple, for client display.
#[derive(Debug)]
pub enum Admission {
    Accepted(Booking),
    Conflict(Booking),
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Booking not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
