//! Server configuration loaded from environment variables.
//!
//! Required values (database URL, admin token, provider credentials) panic
//! at boot when missing or malformed; the process must not come up half
//! configured.

/// Top-level configuration assembled at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Static bearer token for the admin API.
    pub admin_api_token: String,
    pub stripe: StripeConfig,
    pub whatsapp: WhatsAppConfig,
    pub email: EmailConfig,
    pub messaging: MessagingConfig,
}

/// Per-account Stripe credentials. The two programs bill through separate
/// Stripe accounts.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub mahad_secret_key: String,
    pub dugsi_secret_key: String,
    pub mahad_webhook_secret: String,
    pub dugsi_webhook_secret: String,
}

#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    pub access_token: String,
    pub phone_number_id: String,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_key: String,
    /// `From` identity, e.g. `Maktab <admin@school.org>`.
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct MessagingConfig {
    /// Fixed pause between bulk sends, for the provider rate limit.
    pub send_delay_ms: u64,
    /// Window within which a repeated (recipient, template) send is refused.
    pub dedupe_window_hours: i32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `3000`                  |
    /// | `CORS_ORIGINS`                | `http://localhost:3001` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `ADMIN_API_TOKEN`             | required                |
    /// | `STRIPE_MAHAD_SECRET_KEY`     | required                |
    /// | `STRIPE_DUGSI_SECRET_KEY`     | required                |
    /// | `STRIPE_MAHAD_WEBHOOK_SECRET` | required                |
    /// | `STRIPE_DUGSI_WEBHOOK_SECRET` | required                |
    /// | `WHATSAPP_ACCESS_TOKEN`       | required                |
    /// | `WHATSAPP_PHONE_NUMBER_ID`    | required                |
    /// | `RESEND_API_KEY`              | required                |
    /// | `RESEND_FROM`                 | required                |
    /// | `MESSAGE_SEND_DELAY_MS`       | `1000`                  |
    /// | `MESSAGE_DEDUPE_WINDOW_HOURS` | `24`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let send_delay_ms: u64 = std::env::var("MESSAGE_SEND_DELAY_MS")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("MESSAGE_SEND_DELAY_MS must be a valid u64");

        let dedupe_window_hours: i32 = std::env::var("MESSAGE_DEDUPE_WINDOW_HOURS")
            .unwrap_or_else(|_| "24".into())
            .parse()
            .expect("MESSAGE_DEDUPE_WINDOW_HOURS must be a valid i32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            admin_api_token: required("ADMIN_API_TOKEN"),
            stripe: StripeConfig {
                mahad_secret_key: required("STRIPE_MAHAD_SECRET_KEY"),
                dugsi_secret_key: required("STRIPE_DUGSI_SECRET_KEY"),
                mahad_webhook_secret: required("STRIPE_MAHAD_WEBHOOK_SECRET"),
                dugsi_webhook_secret: required("STRIPE_DUGSI_WEBHOOK_SECRET"),
            },
            whatsapp: WhatsAppConfig {
                access_token: required("WHATSAPP_ACCESS_TOKEN"),
                phone_number_id: required("WHATSAPP_PHONE_NUMBER_ID"),
            },
            email: EmailConfig {
                api_key: required("RESEND_API_KEY"),
                from: required("RESEND_FROM"),
            },
            messaging: MessagingConfig {
                send_delay_ms,
                dedupe_window_hours,
            },
        }
    }
}

fn required(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set"))
}
