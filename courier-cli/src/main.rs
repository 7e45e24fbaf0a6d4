//! Courier CLI Tool
//!
//! Command line interface for checking and exercising a Courier deployment

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use courier_core::config::loader::load_settings;
use courier_core::{MessengerClient, Settings, TelegramClient};
use courier_relay::{MessageRelay, RelayRequest};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "courier-cli")]
#[command(about = "A CLI tool for checking and testing Courier")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration from the environment (and .env)
    CheckConfig,
    /// Send a message to the configured chat
    Send {
        /// Message text
        #[arg(short, long)]
        message: String,
    },
    /// Show the bot identity reported by Telegram
    Whoami,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = load_settings()?;

    match cli.command {
        Commands::CheckConfig => check_config(&settings),
        Commands::Send { message } => send(&settings, &message).await?,
        Commands::Whoami => whoami(&settings).await?,
    }

    Ok(())
}

/// 检查配置
fn check_config(settings: &Settings) {
    println!("Checking configuration...");
    println!("  - bind address: {}", settings.bind_address());
    println!("  - Telegram API: {}", settings.api_base_url);
    println!("  - missing config policy: {}", settings.missing_config_policy);
    println!("  - health check queries bot: {}", settings.health_check_bot);

    match settings.validate() {
        Ok(()) => match &settings.relay {
            Some(relay) => {
                println!("✅ Configuration is valid");
                println!("  - chat id: {}", relay.chat_id());
            }
            None => {
                println!(
                    "⚠️  Missing {} - the server will start but report configuration errors",
                    settings.missing.join(", ")
                );
            }
        },
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn build_relay(settings: &Settings) -> Result<MessageRelay> {
    let config = settings.require_relay()?;
    let client: Arc<dyn MessengerClient> = Arc::new(TelegramClient::from_settings(settings, config));
    Ok(MessageRelay::new(config.clone(), client))
}

/// 发送一条消息
async fn send(settings: &Settings, message: &str) -> Result<()> {
    let relay = build_relay(settings)?;
    let request = RelayRequest::new(message)?;

    println!("Sending message to chat {}...", relay.chat_id());
    match relay.deliver(&request).await {
        Ok(delivery) => {
            println!("✅ {}", delivery.message);
            println!("{}", serde_json::to_string_pretty(&delivery)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", serde_json::to_string_pretty(&e.to_body())?);
            bail!("❌ Delivery failed ({}): {}", e.status_code(), e);
        }
    }
}

/// 查询机器人信息
async fn whoami(settings: &Settings) -> Result<()> {
    let relay = build_relay(settings)?;

    let report = relay.health(true).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.is_ok() {
        bail!("❌ Telegram did not accept the bot token");
    }
    Ok(())
}
