use crate::router::router::create_app_router;
use courier_core::config::loader::load_settings;
use courier_core::{MessengerClient, MissingConfigPolicy, Settings, TelegramClient};
use courier_relay::MessageRelay;

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// 应用状态，启动后只读
#[derive(Clone)]
pub struct AppState {
    /// 缺少 BOT_TOKEN / CHAT_ID 时为 None，所有请求走配置错误路径
    pub relay: Option<Arc<MessageRelay>>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// 创建新的应用状态，按配置的策略处理缺失的变量
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;

        let client: Option<Arc<dyn MessengerClient>> = settings.relay.as_ref().map(|relay| {
            Arc::new(TelegramClient::from_settings(&settings, relay)) as Arc<dyn MessengerClient>
        });

        Ok(Self::from_parts(settings, client))
    }

    /// 使用指定的客户端创建状态
    pub fn with_client(settings: Settings, client: Arc<dyn MessengerClient>) -> Self {
        Self::from_parts(settings, Some(client))
    }

    fn from_parts(settings: Settings, client: Option<Arc<dyn MessengerClient>>) -> Self {
        let relay = match (settings.relay.clone(), client) {
            (Some(config), Some(client)) => Some(Arc::new(MessageRelay::new(config, client))),
            _ => None,
        };

        Self {
            relay,
            settings: Arc::new(settings),
        }
    }
}

/// 创建应用路由
pub fn create_app(state: AppState) -> Router {
    create_app_router().with_state(state)
}

/// 启动应用服务器
pub async fn start_server() -> Result<()> {
    // .env 文件是可选的
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Starting Courier server...");
    info!(
        "Build Time: {}",
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    );
    info!("Git Commit: {}", option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"));
    if dotenv_loaded {
        info!("Loaded environment from .env file");
    }

    let settings = load_settings()?;
    info!("Missing configuration policy: {}", settings.missing_config_policy);

    match &settings.relay {
        Some(relay) => info!("Relaying messages to chat {}", relay.chat_id()),
        None => match settings.missing_config_policy {
            MissingConfigPolicy::Abort => {
                error!(
                    "Missing required environment variables: {}",
                    settings.missing.join(", ")
                );
            }
            MissingConfigPolicy::Degrade => {
                warn!(
                    "Missing required environment variables: {} - every request will report a configuration error",
                    settings.missing.join(", ")
                );
            }
        },
    }

    let app_state = match AppState::new(settings) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            return Err(e);
        }
    };

    let bind_addr = app_state.settings.bind_address();
    let app = create_app(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let addr = listener.local_addr()?;

    info!("Server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /                  - Service discovery");
    info!("  GET  /api/health        - Health check");
    info!("  POST /api/send-message  - Relay a message to Telegram");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install CTRL+C signal handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
