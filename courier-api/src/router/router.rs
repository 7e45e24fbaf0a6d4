use crate::app::AppState;
use axum::{
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use courier_relay::ErrorBody;
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{health::health_check, send::send_message};

/// 创建应用路由
pub fn create_app_router() -> Router<AppState> {
    Router::new()
        // 其他方法同样返回 JSON 404
        .route("/", get(index).fallback(not_found))
        .route("/api/health", get(health_check).fallback(not_found))
        // 方法检查在管线内完成，以便先报告配置错误
        .route("/api/send-message", any(send_message))
        .fallback(not_found)
        // 所有路由都允许跨域访问
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// 首页处理器：服务发现
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "status": "online",
        "service": "Telegram Bot API",
        "endpoints": {
            "health": "GET /api/health",
            "sendMessage": "POST /api/send-message"
        }
    }))
}

/// 未匹配的路径
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::not_found()))
}
