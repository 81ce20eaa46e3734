//! HTTP client for the Resend transactional email API.

use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.resend.com";

/// Errors from the email API layer.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Email request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Email API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Provider error message, or the raw body if it was not decodable.
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for one Resend sending identity.
pub struct ResendClient {
    client: reqwest::Client,
    api_key: String,
    from: String,
    base_url: String,
}

impl ResendClient {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            from,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (test servers).
    pub fn with_base_url(api_key: String, from: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            from,
            base_url,
        }
    }

    /// Send one HTML email.
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError> {
        let url = format!("{}/emails", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "from": self.from,
                "to": [to],
                "subject": subject,
                "html": html,
            }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|error| error.message)
            .unwrap_or(body);
        Err(EmailError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
