use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";
pub const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 30;

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("缺少必需的环境变量: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),
    #[error("环境变量 {name} 的值无效: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// 转发所需的最小配置：机器人令牌 + 目标聊天
///
/// 只能通过 [`RelayConfig::new`] 构造，两个字段都保证非空。
#[derive(Clone, PartialEq, Eq)]
pub struct RelayConfig {
    bot_token: String,
    chat_id: String,
}

impl RelayConfig {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Result<Self, ConfigError> {
        let bot_token = bot_token.into().trim().to_string();
        let chat_id = chat_id.into().trim().to_string();

        let mut missing = Vec::new();
        if bot_token.is_empty() {
            missing.push("BOT_TOKEN");
        }
        if chat_id.is_empty() {
            missing.push("CHAT_ID");
        }
        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing));
        }

        Ok(Self { bot_token, chat_id })
    }

    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

// 令牌不能出现在日志里
impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("bot_token", &"***")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// 缺少必需配置时的处理策略
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingConfigPolicy {
    /// 拒绝启动（独立服务器模式，默认）
    #[default]
    Abort,
    /// 照常启动，每个请求都返回配置错误（托管/无服务器模式）
    Degrade,
}

impl FromStr for MissingConfigPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(MissingConfigPolicy::Abort),
            "degrade" => Ok(MissingConfigPolicy::Degrade),
            _ => Err(ConfigError::InvalidValue {
                name: "MISSING_CONFIG_POLICY",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for MissingConfigPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingConfigPolicy::Abort => write!(f, "abort"),
            MissingConfigPolicy::Degrade => write!(f, "degrade"),
        }
    }
}

/// 进程级配置，启动时读取一次，之后不可变
#[derive(Debug, Clone)]
pub struct Settings {
    /// 转发配置；缺少 BOT_TOKEN 或 CHAT_ID 时为 None
    pub relay: Option<RelayConfig>,
    /// 缺少的必需变量，用于启动日志和 abort 策略
    pub missing: Vec<&'static str>,
    pub host: String,
    pub port: u16,
    pub missing_config_policy: MissingConfigPolicy,
    /// Telegram Bot API 基础地址，测试时可指向 mock 服务器
    pub api_base_url: String,
    pub connect_timeout_seconds: u64,
    /// 健康检查是否调用 getMe 查询机器人信息
    pub health_check_bot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            relay: None,
            missing: vec!["BOT_TOKEN", "CHAT_ID"],
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            missing_config_policy: MissingConfigPolicy::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECONDS,
            health_check_bot: true,
        }
    }
}

impl Settings {
    /// 使用给定的转发配置创建，其余字段取默认值
    pub fn with_relay(relay: RelayConfig) -> Self {
        Self {
            relay: Some(relay),
            missing: Vec::new(),
            ..Self::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        self.relay.is_some()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// 按 abort 策略要求转发配置存在
    pub fn require_relay(&self) -> Result<&RelayConfig, ConfigError> {
        self.relay
            .as_ref()
            .ok_or_else(|| ConfigError::MissingVariables(self.missing.clone()))
    }

    /// 验证配置在当前策略下是否可以启动服务
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "TELEGRAM_API_URL",
                value: self.api_base_url.clone(),
            });
        }
        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                name: "CONNECT_TIMEOUT_SECONDS",
                value: "0".to_string(),
            });
        }

        match self.missing_config_policy {
            MissingConfigPolicy::Abort => self.require_relay().map(|_| ()),
            MissingConfigPolicy::Degrade => Ok(()),
        }
    }
}
