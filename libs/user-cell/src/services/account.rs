use serde_json::json;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{UserAccount, UserError};

pub struct AccountService {
    supabase: SupabaseClient,
}

impl AccountService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Insert-or-update a profile by email. The store merges by the unique
    /// email column, so an existing role survives a profile refresh.
    pub async fn upsert_user(
        &self,
        email: &str,
        name: Option<String>,
    ) -> Result<UserAccount, UserError> {
        debug!("Upserting user {}", email);

        let mut row = json!({ "email": email });
        if let Some(name) = name {
            row["name"] = json!(name);
        }

        let rows = self
            .supabase
            .upsert("users", "email", row)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| UserError::DatabaseError("Upsert returned no row".to_string()))?;

        serde_json::from_value(row)
            .map_err(|e| UserError::DatabaseError(format!("Failed to parse user: {}", e)))
    }

    pub async fn list_users(&self) -> Result<Vec<UserAccount>, UserError> {
        let rows = self
            .supabase
            .select("users", "select=*")
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<UserAccount>, _>>()
            .map_err(|e| UserError::DatabaseError(format!("Failed to parse users: {}", e)))
    }

    pub async fn get_user(&self, email: &str) -> Result<Option<UserAccount>, UserError> {
        let query = format!("email=eq.{}", urlencoding::encode(email));
        let rows = self
            .supabase
            .select("users", &query)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        match rows.into_iter().next() {
            Some(row) => serde_json::from_value(row)
                .map(Some)
                .map_err(|e| UserError::DatabaseError(format!("Failed to parse user: {}", e))),
            None => Ok(None),
        }
    }

    /// Privileged role elevation; the caller's admin check happens upstream.
    pub async fn grant_admin(&self, email: &str) -> Result<UserAccount, UserError> {
        let query = format!("email=eq.{}", urlencoding::encode(email));
        let rows = self
            .supabase
            .update("users", &query, json!({ "role": "admin" }))
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let row = rows.into_iter().next().ok_or(UserError::NotFound)?;

        let account: UserAccount = serde_json::from_value(row)
            .map_err(|e| UserError::DatabaseError(format!("Failed to parse user: {}", e)))?;

        info!("Granted admin role to {}", email);
        Ok(account)
    }
}
