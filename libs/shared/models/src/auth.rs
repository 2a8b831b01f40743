use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub email: String,
    pub exp: Option<u64>,
    pub iat: Option<u64>,
}

/// Authenticated caller identity, decoded from the bearer token and attached
/// to request extensions by the auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
}
