use crate::config::model::{
    ConfigError, MissingConfigPolicy, RelayConfig, Settings, DEFAULT_API_BASE_URL,
    DEFAULT_CONNECT_TIMEOUT_SECONDS, DEFAULT_HOST, DEFAULT_PORT,
};

pub fn load_settings() -> Result<Settings, anyhow::Error> {
    load_settings_from(|key| std::env::var(key).ok())
}

/// 从任意键值来源加载配置，测试时无需修改进程环境变量
pub fn load_settings_from<F>(lookup: F) -> Result<Settings, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
{
    // 空字符串和未设置同等对待
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let bot_token = get("BOT_TOKEN");
    let chat_id = get("CHAT_ID");

    let (relay, missing) = match RelayConfig::new(
        bot_token.unwrap_or_default(),
        chat_id.unwrap_or_default(),
    ) {
        Ok(relay) => (Some(relay), Vec::new()),
        Err(ConfigError::MissingVariables(missing)) => (None, missing),
        Err(e) => return Err(e.into()),
    };

    let port = match get("PORT") {
        Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
            name: "PORT",
            value: raw.clone(),
        })?,
        None => DEFAULT_PORT,
    };

    let missing_config_policy = match get("MISSING_CONFIG_POLICY") {
        Some(raw) => raw.parse::<MissingConfigPolicy>()?,
        None => MissingConfigPolicy::default(),
    };

    let connect_timeout_seconds = match get("CONNECT_TIMEOUT_SECONDS") {
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
            name: "CONNECT_TIMEOUT_SECONDS",
            value: raw.clone(),
        })?,
        None => DEFAULT_CONNECT_TIMEOUT_SECONDS,
    };

    let health_check_bot = match get("HEALTH_CHECK_BOT") {
        Some(raw) => parse_bool("HEALTH_CHECK_BOT", &raw)?,
        None => true,
    };

    let api_base_url = get("TELEGRAM_API_URL")
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    Ok(Settings {
        relay,
        missing,
        host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port,
        missing_config_policy,
        api_base_url,
        connect_timeout_seconds,
        health_check_bot,
    })
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: raw.to_string(),
        }),
    }
}
