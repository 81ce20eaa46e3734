//! REST client for the Stripe API endpoints this service calls.

use maktab_core::program::Program;
use serde::Deserialize;

use crate::types::StripeSubscription;

const DEFAULT_BASE_URL: &str = "https://api.stripe.com";

/// Errors from the Stripe REST layer.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Stripe request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Stripe returned a non-2xx status code.
    #[error("Stripe API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Stripe's error message, or the raw body if it was not decodable.
        message: String,
    },
}

/// Stripe's error envelope (`{ "error": { "message": ... } }`).
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for a single Stripe account.
pub struct StripeClient {
    client: reqwest::Client,
    secret_key: String,
    base_url: String,
}

impl StripeClient {
    /// Create a client authenticating with the given account secret key.
    pub fn new(secret_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (test servers).
    pub fn with_base_url(secret_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key,
            base_url,
        }
    }

    /// Fetch a subscription by id (`GET /v1/subscriptions/{id}`).
    pub async fn get_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<StripeSubscription, StripeError> {
        let url = format!("{}/v1/subscriptions/{subscription_id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Cancel a subscription immediately (`DELETE /v1/subscriptions/{id}`).
    pub async fn cancel_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<StripeSubscription, StripeError> {
        let url = format!("{}/v1/subscriptions/{subscription_id}", self.base_url);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<StripeSubscription, StripeError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<StripeSubscription>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.error.message)
            .unwrap_or(body);
        Err(StripeError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// One Stripe client per program account.
pub struct StripeAccounts {
    mahad: StripeClient,
    dugsi: StripeClient,
}

impl StripeAccounts {
    pub fn new(mahad: StripeClient, dugsi: StripeClient) -> Self {
        Self { mahad, dugsi }
    }

    /// The client for a program's Stripe account.
    pub fn for_program(&self, program: Program) -> &StripeClient {
        match program {
            Program::Mahad => &self.mahad,
            Program::Dugsi => &self.dugsi,
        }
    }
}
