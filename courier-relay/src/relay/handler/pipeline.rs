use axum::http::Method;
use serde_json::Value;

use super::relay::MessageRelay;
use super::types::{Delivery, HealthReport, RelayError, RelayRequest};

/// 发送管线的结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// OPTIONS 预检请求，返回 200 空响应
    Preflight,
    Delivered(Delivery),
}

/// 处理一次发送请求，与具体的HTTP框架无关
///
/// 检查顺序：预检 → 配置 → 方法 → 消息内容 → 出站发送。
/// 任何一步失败都会立即返回，不会产生出站请求。
pub async fn handle_send(
    relay: Option<&MessageRelay>,
    method: &Method,
    body: Option<&Value>,
) -> Result<SendOutcome, RelayError> {
    if *method == Method::OPTIONS {
        return Ok(SendOutcome::Preflight);
    }

    let relay = match relay {
        Some(relay) => relay,
        None => {
            tracing::error!("Send request rejected: BOT_TOKEN or CHAT_ID is not configured");
            return Err(RelayError::Configuration);
        }
    };

    if *method != Method::POST {
        tracing::warn!("Send request rejected: method {} is not allowed", method);
        return Err(RelayError::MethodNotAllowed);
    }

    let request = match RelayRequest::from_json(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Send request rejected: message is missing or empty");
            return Err(e);
        }
    };

    relay.deliver(&request).await.map(SendOutcome::Delivered)
}

/// 处理一次健康检查请求
pub async fn handle_health(relay: Option<&MessageRelay>, check_bot: bool) -> HealthReport {
    match relay {
        Some(relay) => relay.health(check_bot).await,
        None => {
            tracing::error!("Health check failed: BOT_TOKEN or CHAT_ID is not configured");
            HealthReport::unconfigured()
        }
    }
}
