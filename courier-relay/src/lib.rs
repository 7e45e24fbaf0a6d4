//! Courier Relay Library
//!
//! This library provides the message relay pipeline for Courier including:
//! - Request validation
//! - Delivery through a messaging provider client
//! - Error classification and JSON envelopes

pub mod relay;

// Re-export commonly used types
pub use relay::handler::{
    handle_health, handle_send, Delivery, ErrorBody, HealthReport, MessageRelay, RelayError,
    RelayRequest, SendOutcome,
};
