use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Payment-processor client (Stripe payment-intents API).
pub struct PaymentService {
    client: Client,
    api_base: String,
    secret_key: String,
}

impl PaymentService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: config.stripe_api_base.clone(),
            secret_key: config.stripe_secret_key.clone(),
        }
    }

    /// Create a payment intent for a dollar price and return the client
    /// secret the frontend needs to confirm the card payment.
    pub async fn create_payment_intent(&self, price: f64) -> Result<String> {
        let amount = (price * 100.0).round() as i64;
        debug!("Creating payment intent for {} cents", amount);

        let url = format!("{}/v1/payment_intents", self.api_base);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", amount.to_string()),
                ("currency", "usd".to_string()),
                ("payment_method_types[]", "card".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Payment processor error ({}): {}", status, error_text);
            return Err(anyhow!("Payment processor error ({}): {}", status, error_text));
        }

        let body: Value = response.json().await?;
        let client_secret = body["client_secret"]
            .as_str()
            .ok_or_else(|| anyhow!("Payment intent response missing client_secret"))?;

        Ok(client_secret.to_string())
    }
}
