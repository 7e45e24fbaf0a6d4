//! Courier Server
//!
//! Main entry point for the Courier HTTP to Telegram relay

use courier_api::start_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    start_server().await
}
