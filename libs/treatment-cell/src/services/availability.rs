use std::collections::HashSet;

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{BookedSlot, Treatment};
use crate::services::catalog::CatalogService;

pub struct AvailabilityService {
    supabase: SupabaseClient,
    catalog: CatalogService,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            catalog: CatalogService::new(config),
        }
    }

    /// Every treatment with its slot list reduced to the slots not yet booked
    /// on the given date. The date is matched by exact string equality; a
    /// date nobody booked (or a malformed one) leaves every schedule intact.
    pub async fn available_treatments(&self, date: &str) -> Result<Vec<Treatment>> {
        debug!("Computing availability for {}", date);

        let treatments = self.catalog.list_treatments().await?;
        let booked = self.booked_slots_on(date).await?;

        Ok(remove_booked(treatments, &booked))
    }

    async fn booked_slots_on(&self, date: &str) -> Result<Vec<BookedSlot>> {
        let query = format!(
            "select=treatment,slot&date=eq.{}",
            urlencoding::encode(date)
        );
        let rows: Vec<Value> = self.supabase.select("bookings", &query).await?;

        let booked = rows
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<BookedSlot>, _>>()?;

        Ok(booked)
    }
}

/// Stable filter: each treatment keeps its original slot order, minus any
/// slot already taken by a booking for that treatment.
pub fn remove_booked(treatments: Vec<Treatment>, booked: &[BookedSlot]) -> Vec<Treatment> {
    treatments
        .into_iter()
        .map(|mut treatment| {
            let taken: HashSet<&str> = booked
                .iter()
                .filter(|b| b.treatment == treatment.name)
                .map(|b| b.slot.as_str())
                .collect();

            treatment.slots.retain(|slot| !taken.contains(slot.as_str()));
            treatment
        })
        .collect()
}
