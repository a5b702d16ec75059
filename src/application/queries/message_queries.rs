//! Message Queries

/// 获取语音消息详情查询
#[derive(Debug, Clone)]
pub struct GetMessage {
    pub message_id: u64,
}

/// 列出所有语音消息查询
#[derive(Debug, Clone)]
pub struct ListMessages;
