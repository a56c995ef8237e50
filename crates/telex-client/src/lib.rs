//! Telex.im integration client.
//!
//! Pushes agent replies and daily tips to the Telex webhook and registers
//! the agent with the platform.

pub mod client;
pub mod tips;

pub use client::{OutboundMessage, TelexClient, validate_reply};

/// Default Telex webhook endpoint.
pub const DEFAULT_WEBHOOK_URL: &str = "https://api.telex.im/webhook";

/// Unified error type for the telex-client crate.
#[derive(Debug, thiserror::Error)]
pub enum TelexError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telex returned {status}: {message}")]
    Api { status: u16, message: String },
}
