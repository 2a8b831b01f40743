use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::Treatment;

pub struct CatalogService {
    supabase: SupabaseClient,
}

impl CatalogService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Treatment names only, for the public service list.
    pub async fn list_treatment_names(&self) -> Result<Vec<String>> {
        debug!("Listing treatment names");

        let rows = self.supabase.select("treatments", "select=name").await?;

        let names = rows
            .iter()
            .filter_map(|row| row["name"].as_str().map(str::to_string))
            .collect();

        Ok(names)
    }

    /// All treatments with price and full slot schedule.
    pub async fn list_treatments(&self) -> Result<Vec<Treatment>> {
        debug!("Listing treatments");

        let rows: Vec<Value> = self.supabase.select("treatments", "select=*").await?;

        let treatments = rows
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Treatment>, _>>()?;

        Ok(treatments)
    }
}
