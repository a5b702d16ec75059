//! Message Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MessageId, ScannableCode};
use crate::domain::voice::VoiceId;

/// 未提供患者姓名时的默认值
pub const DEFAULT_PATIENT_NAME: &str = "Patient";

/// 音色已不在注册表中时的占位名称
pub const UNKNOWN_VOICE_NAME: &str = "Unknown";

/// 语音消息聚合根
///
/// 不变量:
/// - 创建后不可修改，也没有删除入口
/// - voice_id 是弱引用：音色被删除后消息仍然有效，
///   voice_name 是创建时解析并缓存的名称
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMessage {
    id: MessageId,
    voice_id: VoiceId,
    voice_name: String,
    message_text: String,
    patient_name: String,
    audio_file_name: String,
    audio_url: String,
    scannable_code: ScannableCode,
    created_at: DateTime<Utc>,
}

/// 构造 GeneratedMessage 所需的字段
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub id: MessageId,
    pub voice_id: VoiceId,
    pub voice_name: String,
    pub message_text: String,
    pub patient_name: Option<String>,
    pub audio_file_name: String,
    pub audio_url: String,
    pub scannable_code: ScannableCode,
}

impl GeneratedMessage {
    pub fn new(fields: NewMessage) -> Self {
        let patient_name = fields
            .patient_name
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PATIENT_NAME.to_string());

        Self {
            id: fields.id,
            voice_id: fields.voice_id,
            voice_name: fields.voice_name,
            message_text: fields.message_text,
            patient_name,
            audio_file_name: fields.audio_file_name,
            audio_url: fields.audio_url,
            scannable_code: fields.scannable_code,
            created_at: Utc::now(),
        }
    }

    // Getters
    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn voice_id(&self) -> &VoiceId {
        &self.voice_id
    }

    pub fn voice_name(&self) -> &str {
        &self.voice_name
    }

    pub fn message_text(&self) -> &str {
        &self.message_text
    }

    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    pub fn audio_file_name(&self) -> &str {
        &self.audio_file_name
    }

    pub fn audio_url(&self) -> &str {
        &self.audio_url
    }

    pub fn scannable_code(&self) -> &ScannableCode {
        &self.scannable_code
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(patient_name: Option<String>) -> NewMessage {
        NewMessage {
            id: MessageId::from_u64(1),
            voice_id: VoiceId::new("v-001").unwrap(),
            voice_name: "Dr. Smith".to_string(),
            message_text: "Take two tablets daily.".to_string(),
            patient_name,
            audio_file_name: "message-1.mp3".to_string(),
            audio_url: "http://localhost:3000/uploads/message-1.mp3".to_string(),
            scannable_code: ScannableCode::new("data:image/png;base64,AAAA").unwrap(),
        }
    }

    #[test]
    fn test_patient_name_default() {
        let message = GeneratedMessage::new(fields(None));
        assert_eq!(message.patient_name(), DEFAULT_PATIENT_NAME);

        let message = GeneratedMessage::new(fields(Some(String::new())));
        assert_eq!(message.patient_name(), DEFAULT_PATIENT_NAME);

        let message = GeneratedMessage::new(fields(Some("Jane Doe".to_string())));
        assert_eq!(message.patient_name(), "Jane Doe");
    }

    #[test]
    fn test_serializes_camel_case() {
        let message = GeneratedMessage::new(fields(None));
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["voiceId"], "v-001");
        assert_eq!(json["audioUrl"], "http://localhost:3000/uploads/message-1.mp3");
        assert_eq!(json["id"], 1);
    }
}
