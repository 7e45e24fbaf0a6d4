use crate::app::AppState;
use axum::{extract::State, response::IntoResponse};
use courier_relay::handle_health;

/// 健康检查处理器
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    handle_health(state.relay.as_deref(), state.settings.health_check_bot).await
}
