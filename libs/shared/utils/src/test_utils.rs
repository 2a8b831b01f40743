use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use shared_config::AppConfig;
use shared_models::auth::Identity;

pub struct TestConfig {
    pub jwt_secret: String,
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub sendgrid_api_key: String,
    pub sendgrid_api_base: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "test-service-key".to_string(),
            stripe_secret_key: "sk_test_key".to_string(),
            stripe_api_base: "http://localhost:12111".to_string(),
            // Empty key leaves the mailer disabled unless a test opts in
            sendgrid_api_key: String::new(),
            sendgrid_api_base: "http://localhost:12112".to_string(),
        }
    }
}

impl TestConfig {
    /// Point the store client at a mock server.
    pub fn with_store_url(mut self, url: &str) -> Self {
        self.supabase_url = url.to_string();
        self
    }

    pub fn with_stripe_base(mut self, url: &str) -> Self {
        self.stripe_api_base = url.to_string();
        self
    }

    pub fn with_sendgrid_base(mut self, url: &str) -> Self {
        self.sendgrid_api_base = url.to_string();
        self
    }

    /// Enable the mailer; it stays disabled while the key is empty.
    pub fn with_sendgrid_key(mut self, key: &str) -> Self {
        self.sendgrid_api_key = key.to_string();
        self
    }

    pub fn without_stripe_key(mut self) -> Self {
        self.stripe_secret_key = String::new();
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_service_key: self.supabase_service_key.clone(),
            jwt_secret: self.jwt_secret.clone(),
            stripe_secret_key: self.stripe_secret_key.clone(),
            stripe_api_base: self.stripe_api_base.clone(),
            sendgrid_api_key: self.sendgrid_api_key.clone(),
            sendgrid_api_base: self.sendgrid_api_base.clone(),
            email_sender: "noreply@doctorsportal.example".to_string(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub fn test_identity(email: &str) -> Identity {
    Identity {
        email: email.to_string(),
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(email: &str, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(1));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": email,
            "email": email,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(email: &str, secret: &str) -> String {
        Self::create_test_token(email, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(email: &str) -> String {
        Self::create_test_token(email, "wrong-secret", Some(1))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}
