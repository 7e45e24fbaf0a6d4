use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use courier_core::{BotIdentity, ClientError};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const CONFIGURATION_ERROR_MESSAGE: &str =
    "Сервис не настроен. Проверьте переменные окружения.";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Метод не разрешен. Используйте POST.";
pub const INVALID_MESSAGE_MESSAGE: &str = "Сообщение не может быть пустым и должно быть строкой";
pub const CHAT_NOT_FOUND_MESSAGE: &str =
    "Чат не найден. Убедитесь, что бот добавлен в чат и CHAT_ID правильный.";
pub const DELIVERED_MESSAGE: &str = "Сообщение успешно отправлено в Telegram";
pub const ENDPOINT_NOT_FOUND_MESSAGE: &str = "Endpoint not found";
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";

/// 响应时间戳：ISO-8601，毫秒精度，UTC
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 错误类型枚举，用于确定HTTP状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 缺少 BOT_TOKEN / CHAT_ID - 500
    ConfigurationError,
    /// 非 POST 请求 - 405
    MethodNotAllowed,
    /// 消息缺失、为空或不是字符串 - 400
    InvalidArgument,
    /// Telegram 返回的结构化错误 - 400
    RemoteApiError,
    /// 网络或其他未知错误 - 500
    UnknownError,
}

impl ErrorKind {
    /// 获取对应的HTTP状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::ConfigurationError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorKind::RemoteApiError => StatusCode::BAD_REQUEST,
            ErrorKind::UnknownError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 转发管线的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("{}", CONFIGURATION_ERROR_MESSAGE)]
    Configuration,
    #[error("{}", METHOD_NOT_ALLOWED_MESSAGE)]
    MethodNotAllowed,
    #[error("{}", INVALID_MESSAGE_MESSAGE)]
    InvalidArgument,
    #[error("{message}")]
    RemoteApi { message: String, code: Option<i64> },
    #[error("{0}")]
    Unknown(String),
}

/// 错误响应中的 `code` 字段：Telegram 的数字错误码或通用标记
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Provider(i64),
    Sentinel(&'static str),
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::Configuration => ErrorKind::ConfigurationError,
            RelayError::MethodNotAllowed => ErrorKind::MethodNotAllowed,
            RelayError::InvalidArgument => ErrorKind::InvalidArgument,
            RelayError::RemoteApi { .. } => ErrorKind::RemoteApiError,
            RelayError::Unknown(_) => ErrorKind::UnknownError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    /// 只有远程调用失败时才带 code
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            RelayError::RemoteApi {
                code: Some(code), ..
            } => Some(ErrorCode::Provider(*code)),
            RelayError::RemoteApi { code: None, .. } | RelayError::Unknown(_) => {
                Some(ErrorCode::Sentinel(UNKNOWN_ERROR_CODE))
            }
            _ => None,
        }
    }

    /// 对客户端错误分类
    pub fn from_client_error(error: ClientError) -> Self {
        match error {
            ClientError::Api {
                description,
                error_code,
            } => {
                let message = if description.to_lowercase().contains("chat not found") {
                    CHAT_NOT_FOUND_MESSAGE.to_string()
                } else {
                    description
                };
                RelayError::RemoteApi {
                    message,
                    code: error_code,
                }
            }
            other => RelayError::Unknown(other.to_string()),
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            error: self.to_string(),
            code: self.code(),
        }
    }
}

impl From<ClientError> for RelayError {
    fn from(error: ClientError) -> Self {
        RelayError::from_client_error(error)
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}

/// 统一的错误响应体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl ErrorBody {
    pub fn not_found() -> Self {
        Self {
            success: false,
            error: ENDPOINT_NOT_FOUND_MESSAGE.to_string(),
            code: None,
        }
    }
}

/// 经过验证的转发请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRequest {
    message: String,
}

impl RelayRequest {
    /// 从JSON body创建请求，消息会被去除首尾空白
    pub fn from_json(body: Option<&Value>) -> Result<Self, RelayError> {
        let message = body
            .and_then(|b| b.get("message"))
            .and_then(|v| v.as_str())
            .ok_or(RelayError::InvalidArgument)?;

        Self::new(message)
    }

    pub fn new(message: &str) -> Result<Self, RelayError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(RelayError::InvalidArgument);
        }

        Ok(Self {
            message: message.to_string(),
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// 发送成功的响应
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    pub chat_id: String,
}

impl Delivery {
    pub fn new(chat_id: &str) -> Self {
        Self {
            success: true,
            message: DELIVERED_MESSAGE.to_string(),
            timestamp: timestamp(),
            chat_id: chat_id.to_string(),
        }
    }
}

impl IntoResponse for Delivery {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// 健康检查中展示的机器人信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotSummary {
    pub username: Option<String>,
    pub first_name: String,
    pub is_bot: bool,
}

impl From<BotIdentity> for BotSummary {
    fn from(identity: BotIdentity) -> Self {
        Self {
            username: identity.username,
            first_name: identity.first_name,
            is_bot: identity.is_bot,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Error,
}

/// 健康检查结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot: Option<BotSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

impl HealthReport {
    pub fn ok(chat_id: &str, bot: Option<BotSummary>) -> Self {
        Self {
            status: HealthStatus::Ok,
            bot,
            chat_id: Some(chat_id.to_string()),
            message: None,
            error: None,
            timestamp: timestamp(),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            status: HealthStatus::Error,
            bot: None,
            chat_id: None,
            message: Some(CONFIGURATION_ERROR_MESSAGE.to_string()),
            error: None,
            timestamp: timestamp(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Error,
            bot: None,
            chat_id: None,
            message: None,
            error: Some(error.into()),
            timestamp: timestamp(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == HealthStatus::Ok
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_ok() {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for HealthReport {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self)).into_response()
    }
}
