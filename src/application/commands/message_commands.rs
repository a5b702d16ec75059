//! Message Commands

/// 生成语音消息命令
#[derive(Debug, Clone)]
pub struct GenerateMessage {
    pub voice_id: String,
    pub message_text: String,
    pub patient_name: Option<String>,
    /// 覆盖默认 stability
    pub stability: Option<f32>,
    /// 覆盖默认 similarity_boost
    pub similarity_boost: Option<f32>,
    /// 对外可访问的服务地址（如 `http://example.com:3000`），用于拼接音频 URL
    pub public_base_url: String,
}
