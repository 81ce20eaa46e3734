//! Stripe integration: REST client, typed object subset, and webhook
//! signature verification.
//!
//! The school runs two separate Stripe accounts, one per program;
//! [`StripeAccounts`] holds a client for each.

mod client;
pub mod types;
pub mod webhook;

pub use client::{StripeAccounts, StripeClient, StripeError};
