//! Courier Core Library
//!
//! This library provides core functionality for the Courier relay including:
//! - Configuration management
//! - Telegram Bot API client
//! - Shared types and utilities

pub mod client;
pub mod config;

// Re-export commonly used types
pub use client::{BotIdentity, ClientError, MessengerClient, SentMessage, TelegramClient};
pub use config::model::{ConfigError, MissingConfigPolicy, RelayConfig, Settings};
