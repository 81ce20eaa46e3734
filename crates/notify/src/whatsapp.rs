//! HTTP client for the WhatsApp Business (Cloud API) template endpoint.

use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v20.0";

/// Errors from the WhatsApp API layer.
#[derive(Debug, thiserror::Error)]
pub enum WhatsAppError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("WhatsApp request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("WhatsApp API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Provider error message, or the raw body if it was not decodable.
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for one WhatsApp Business phone number.
pub struct WhatsAppClient {
    client: reqwest::Client,
    access_token: String,
    phone_number_id: String,
    base_url: String,
}

impl WhatsAppClient {
    pub fn new(access_token: String, phone_number_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
            phone_number_id,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (test servers).
    pub fn with_base_url(
        access_token: String,
        phone_number_id: String,
        base_url: String,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
            phone_number_id,
            base_url,
        }
    }

    /// Send an approved template to one E.164 recipient.
    ///
    /// `body_params` fill the template's `{{n}}` body placeholders in order.
    pub async fn send_template(
        &self,
        to: &str,
        template: &str,
        body_params: &[String],
    ) -> Result<(), WhatsAppError> {
        let parameters: Vec<serde_json::Value> = body_params
            .iter()
            .map(|text| serde_json::json!({ "type": "text", "text": text }))
            .collect();

        let mut template_body = serde_json::json!({
            "name": template,
            "language": { "code": "en_US" },
        });
        if !parameters.is_empty() {
            template_body["components"] = serde_json::json!([
                { "type": "body", "parameters": parameters }
            ]);
        }

        let url = format!("{}/{}/messages", self.base_url, self.phone_number_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({
                "messaging_product": "whatsapp",
                "to": to,
                "type": "template",
                "template": template_body,
            }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.error.message)
            .unwrap_or(body);
        Err(WhatsAppError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
