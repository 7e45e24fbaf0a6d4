use serde::{Deserialize, Serialize};
use thiserror::Error;

// 定义客户端错误类型
#[derive(Error, Debug)]
pub enum ClientError {
    /// Telegram 返回了结构化错误（ok = false）
    #[error("{description}")]
    Api {
        description: String,
        error_code: Option<i64>,
    },
    /// 请求 URL 含有机器人令牌，构造时必须去掉
    #[error("HTTP请求失败: {0}")]
    Request(#[source] reqwest::Error),
    #[error("JSON解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("上游API返回了无效响应: 状态码 {status}")]
    InvalidResponse { status: u16, body: String },
}

impl ClientError {
    /// 包装传输层错误，去掉其中的请求 URL
    pub fn transport(error: reqwest::Error) -> Self {
        ClientError::Request(error.without_url())
    }

    pub fn is_api_error(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }
}

/// Telegram Bot API 的统一响应包装
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

/// getMe 返回的机器人信息
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BotIdentity {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// sendMessage 成功后返回的消息（只保留需要的字段）
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SentMessage {
    pub message_id: i64,
    #[serde(default)]
    pub date: i64,
}
