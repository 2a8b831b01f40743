use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::Identity;
use shared_models::error::AppError;

use crate::models::UserError;
use crate::services::account::AccountService;

/// The one authorization predicate for privileged routes: the caller must
/// present a valid identity AND that identity's stored record must carry the
/// admin role. Every privileged handler goes through here.
pub struct AuthorizationService {
    accounts: AccountService,
}

impl AuthorizationService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            accounts: AccountService::new(config),
        }
    }

    pub async fn is_admin(&self, email: &str) -> Result<bool, UserError> {
        let user = self.accounts.get_user(email).await?;
        Ok(user.map(|u| u.is_admin()).unwrap_or(false))
    }

    pub async fn require_admin(&self, identity: &Identity) -> Result<(), AppError> {
        debug!("Checking admin role for {}", identity.email);

        let is_admin = self
            .is_admin(&identity.email)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if !is_admin {
            return Err(AppError::Forbidden("Admin role required".to_string()));
        }

        Ok(())
    }
}
