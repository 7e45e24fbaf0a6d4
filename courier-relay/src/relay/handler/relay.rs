use courier_core::{MessengerClient, RelayConfig};
use std::sync::Arc;
use std::time::Instant;

use super::types::{BotSummary, Delivery, HealthReport, RelayError, RelayRequest};

/// 日志中消息预览的最大字符数
const PREVIEW_CHARS: usize = 50;

/// 把消息转发到固定聊天的处理器
///
/// 配置在创建时注入，之后只读；可以在并发请求间共享。
pub struct MessageRelay {
    config: RelayConfig,
    client: Arc<dyn MessengerClient>,
}

impl MessageRelay {
    pub fn new(config: RelayConfig, client: Arc<dyn MessengerClient>) -> Self {
        Self { config, client }
    }

    pub fn chat_id(&self) -> &str {
        self.config.chat_id()
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    /// 发送一条已验证的消息，每次调用恰好一次出站请求，不重试
    pub async fn deliver(&self, request: &RelayRequest) -> Result<Delivery, RelayError> {
        let start = Instant::now();
        let chat_id = self.config.chat_id();

        match self.client.send_message(chat_id, request.message()).await {
            Ok(sent) => {
                tracing::info!(
                    "Message {} delivered to chat {} via {} in {}ms: \"{}\"",
                    sent.message_id,
                    chat_id,
                    self.client.provider_name(),
                    start.elapsed().as_millis(),
                    preview(request.message())
                );
                Ok(Delivery::new(chat_id))
            }
            Err(e) => {
                let error = RelayError::from_client_error(e);
                tracing::error!(
                    "Failed to deliver message to chat {} via {}: {} ({:?})",
                    chat_id,
                    self.client.provider_name(),
                    error,
                    error.kind()
                );
                Err(error)
            }
        }
    }

    /// 健康检查；check_bot 为 true 时查询机器人信息，不发送任何消息
    pub async fn health(&self, check_bot: bool) -> HealthReport {
        if !check_bot {
            return HealthReport::ok(self.config.chat_id(), None);
        }

        match self.client.get_me().await {
            Ok(identity) => {
                tracing::debug!(
                    "Health check passed for bot {:?}",
                    identity.username.as_deref().unwrap_or(&identity.first_name)
                );
                HealthReport::ok(self.config.chat_id(), Some(BotSummary::from(identity)))
            }
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                HealthReport::failed(e.to_string())
            }
        }
    }
}

/// 按字符截断，避免切断多字节字符
fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
