use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

use shared_config::AppConfig;

use crate::models::Booking;

/// Transactional email client (SendGrid mail-send API). Constructed from the
/// injected config so tests can point it at a mock server.
pub struct NotificationService {
    client: Client,
    api_base: String,
    api_key: String,
    sender: String,
    enabled: bool,
}

impl NotificationService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: config.sendgrid_api_base.clone(),
            api_key: config.sendgrid_api_key.clone(),
            sender: config.email_sender.clone(),
            enabled: config.is_email_configured(),
        }
    }

    /// Best-effort confirmation mail after an accepted booking. Callers run
    /// this on a detached task; a failure here must never change the
    /// admission result already sent to the client.
    pub async fn send_booking_confirmation(&self, booking: &Booking) -> Result<()> {
        if !self.enabled {
            debug!("Email not configured, skipping confirmation for {}", booking.id);
            return Ok(());
        }

        let subject = format!(
            "Your appointment for {} on {} is confirmed",
            booking.treatment, booking.date
        );
        let body = format!(
            "Hello {},\n\nYour appointment for {} is confirmed on {} at {}.\n\n\
             Please arrive 15 minutes early.\n\nDoctors Portal",
            booking.patient_name, booking.treatment, booking.date, booking.slot
        );

        let payload = json!({
            "personalizations": [{
                "to": [{ "email": booking.patient_email, "name": booking.patient_name }],
                "subject": subject
            }],
            "from": { "email": self.sender },
            "content": [{ "type": "text/plain", "value": body }]
        });

        let url = format!("{}/v3/mail/send", self.api_base);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Email provider error ({}): {}", status, error_text));
        }

        info!("Confirmation email queued for {}", booking.patient_email);
        Ok(())
    }
}
