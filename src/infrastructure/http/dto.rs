//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::domain::message::GeneratedMessage;
use crate::domain::voice::VoiceIdentity;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self::success(Empty {})
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    /// 暂存时的样本文件名（克隆完成后文件已删除）
    pub source_file_name: String,
    pub created_at: String,
}

impl From<VoiceIdentity> for VoiceResponse {
    fn from(voice: VoiceIdentity) -> Self {
        Self {
            id: voice.id().to_string(),
            name: voice.display_name().to_string(),
            description: voice.description().to_string(),
            source_file_name: voice.source_file_name().to_string(),
            created_at: voice.created_at().to_rfc3339(),
        }
    }
}

// ============================================================================
// Message DTOs
// ============================================================================

/// 缺失的文本字段按空串处理，交给命令校验
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMessageRequest {
    #[serde(default)]
    pub voice_id: String,
    #[serde(default)]
    pub message_text: String,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub stability: Option<f32>,
    #[serde(default)]
    pub similarity_boost: Option<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: u64,
    pub voice_id: String,
    pub voice_name: String,
    pub message_text: String,
    pub patient_name: String,
    pub audio_file_name: String,
    pub audio_url: String,
    pub qr_code: String,
    pub created_at: String,
}

impl From<GeneratedMessage> for MessageResponse {
    fn from(message: GeneratedMessage) -> Self {
        Self {
            id: message.id().as_u64(),
            voice_id: message.voice_id().to_string(),
            voice_name: message.voice_name().to_string(),
            message_text: message.message_text().to_string(),
            patient_name: message.patient_name().to_string(),
            audio_file_name: message.audio_file_name().to_string(),
            audio_url: message.audio_url().to_string(),
            qr_code: message.scannable_code().as_str().to_string(),
            created_at: message.created_at().to_rfc3339(),
        }
    }
}
