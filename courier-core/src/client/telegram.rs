use super::traits::MessengerClient;
use super::types::{ApiResponse, BotIdentity, ClientError, SentMessage};
use crate::config::model::{
    RelayConfig, Settings, DEFAULT_API_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECONDS,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::fmt;
use std::time::Duration;

#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    bot_token: String,
}

impl TelegramClient {
    /// 使用官方 API 地址创建客户端
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self::with_base_url_and_timeout(
            DEFAULT_API_BASE_URL.to_string(),
            bot_token,
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECONDS),
        )
    }

    pub fn with_base_url(base_url: String, bot_token: impl Into<String>) -> Self {
        Self::with_base_url_and_timeout(
            base_url,
            bot_token,
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECONDS),
        )
    }

    pub fn with_base_url_and_timeout(
        base_url: String,
        bot_token: impl Into<String>,
        connect_timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .connect_timeout(connect_timeout) // 只设置连接超时，不限制总请求时间
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
        }
    }

    /// 根据进程配置创建客户端
    pub fn from_settings(settings: &Settings, relay: &RelayConfig) -> Self {
        Self::with_base_url_and_timeout(
            settings.api_base_url.clone(),
            relay.bot_token(),
            settings.connect_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.bot_token, method)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await.map_err(ClientError::transport)?;

        let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(ClientError::JsonParse(e)),
            Err(_) => {
                return Err(ClientError::InvalidResponse {
                    status: status.as_u16(),
                    body,
                })
            }
        };

        if !envelope.ok {
            tracing::debug!(
                "Telegram API returned error {:?}: {:?}",
                envelope.error_code,
                envelope.description
            );
            return Err(ClientError::Api {
                description: envelope
                    .description
                    .unwrap_or_else(|| format!("Telegram API error: HTTP {}", status.as_u16())),
                error_code: envelope.error_code,
            });
        }

        envelope.result.ok_or(ClientError::InvalidResponse {
            status: status.as_u16(),
            body,
        })
    }
}

// 令牌不能出现在日志里
impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MessengerClient for TelegramClient {
    fn provider_name(&self) -> &str {
        "Telegram"
    }

    async fn send_message(&self, chat_id: &str, text: &str) -> Result<SentMessage, ClientError> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&json!({
                "chat_id": chat_id,
                "text": text
            }))
            .send()
            .await
            .map_err(ClientError::transport)?;

        Self::parse_response(response).await
    }

    async fn get_me(&self) -> Result<BotIdentity, ClientError> {
        let response = self
            .client
            .get(self.method_url("getMe"))
            .send()
            .await
            .map_err(ClientError::transport)?;

        Self::parse_response(response).await
    }
}
