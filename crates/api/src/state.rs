use std::sync::Arc;

use maktab_billing::StripeAccounts;
use maktab_notify::Outbox;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: maktab_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Stripe clients, one per program account.
    pub stripe: Arc<StripeAccounts>,
    /// Outbound message coordinator (WhatsApp, email).
    pub outbox: Arc<Outbox>,
}
