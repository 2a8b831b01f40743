use serde_json::json;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{CreateDoctorRequest, Doctor, DoctorError};

pub struct DoctorService {
    supabase: SupabaseClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        debug!("Listing doctors");

        let rows = self
            .supabase
            .select("doctors", "select=*")
            .await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Doctor>, _>>()
            .map_err(|e| DoctorError::DatabaseError(format!("Failed to parse doctors: {}", e)))
    }

    pub async fn add_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        let row = json!({
            "email": request.email,
            "name": request.name,
            "specialty": request.specialty,
            "image_url": request.image_url,
        });

        let rows = self
            .supabase
            .insert("doctors", row)
            .await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DoctorError::DatabaseError("Insert returned no row".to_string()))?;

        let doctor: Doctor = serde_json::from_value(row)
            .map_err(|e| DoctorError::DatabaseError(format!("Failed to parse doctor: {}", e)))?;

        info!("Doctor {} added", doctor.email);
        Ok(doctor)
    }

    pub async fn remove_doctor(&self, email: &str) -> Result<Doctor, DoctorError> {
        let query = format!("email=eq.{}", urlencoding::encode(email));
        let rows = self
            .supabase
            .delete("doctors", &query)
            .await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        let row = rows.into_iter().next().ok_or(DoctorError::NotFound)?;

        let doctor: Doctor = serde_json::from_value(row)
            .map_err(|e| DoctorError::DatabaseError(format!("Failed to parse doctor: {}", e)))?;

        info!("Doctor {} removed", doctor.email);
        Ok(doctor)
    }
}
