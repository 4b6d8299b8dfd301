//! Alert webhook integration
//!
//! Optional relay that forwards committed stock notifications to an
//! external webhook (ops chat bridge, email gateway). Configured through
//! `SIM_ALERT_WEBHOOK_URL`; when unset the platform keeps notifications
//! in-app only.

use serde::Serialize;

/// Alert webhook client
#[derive(Clone)]
pub struct AlertWebhookClient {
    webhook_url: String,
    http_client: reqwest::Client,
}

/// Payload posted for each stock notification
#[derive(Debug, Serialize)]
struct StockAlertPayload<'a> {
    message: &'a str,
    severity: &'a str,
    status_text: &'a str,
}

impl AlertWebhookClient {
    /// Create a new alert webhook client
    pub fn new(webhook_url: String) -> Self {
        Self {
            webhook_url,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("SIM_ALERT_WEBHOOK_URL").ok()?;
        Some(Self::new(url))
    }

    /// Post one stock alert to the webhook
    pub async fn send_stock_alert(
        &self,
        message: &str,
        severity: &str,
        status_text: &str,
    ) -> Result<(), String> {
        let payload = StockAlertPayload {
            message,
            severity,
            status_text,
        };

        let response = self
            .http_client
            .post(&self.webhook_url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("Failed to reach alert webhook: {}", e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("Alert webhook returned {}", response.status()))
        }
    }
}
