//! Courier Server Library
//!
//! This library provides the HTTP server for the Courier relay

pub mod app;
pub mod router;

// Re-export the main server function
pub use app::{create_app, start_server, AppState};
