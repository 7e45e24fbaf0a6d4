use crate::app::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use courier_relay::{handle_send, SendOutcome};
use serde_json::Value;

/// 发送消息到 Telegram
///
/// 无法解析的请求体当作缺少消息处理，由管线返回 400。
pub async fn send_message(
    State(state): State<AppState>,
    method: Method,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = body.ok().map(|Json(value)| value);

    match handle_send(state.relay.as_deref(), &method, body.as_ref()).await {
        Ok(SendOutcome::Preflight) => StatusCode::OK.into_response(),
        Ok(SendOutcome::Delivered(delivery)) => delivery.into_response(),
        Err(e) => e.into_response(),
    }
}
