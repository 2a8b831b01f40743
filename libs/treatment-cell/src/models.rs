use serde::{Deserialize, Serialize};

/// A bookable service ("treatment"). Reference data maintained outside this
/// API; the slot list is the full daily schedule in display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Treatment {
    pub name: String,
    pub price: f64,
    pub slots: Vec<String>,
}

/// Minimal projection of a booking row, enough to subtract taken slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookedSlot {
    pub treatment: String,
    pub slot: String,
}
