use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A site account, keyed by email. `role` is either "admin" or absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
}

impl UserAccount {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpsertUserRequest {
    pub name: Option<String>,
}

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
