use super::types::{BotIdentity, ClientError, SentMessage};
use async_trait::async_trait;

/// 消息平台客户端trait
///
/// 转发管线只依赖这个接口，测试中可以替换为内存实现。
#[async_trait]
pub trait MessengerClient: Send + Sync {
    /// 平台名称，用于日志
    fn provider_name(&self) -> &str;

    /// 向指定聊天发送文本消息
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<SentMessage, ClientError>;

    /// 获取机器人自身信息
    async fn get_me(&self) -> Result<BotIdentity, ClientError>;
}
