//! Voice Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{VoiceId, VoiceName};

/// 未提供描述时使用的默认描述
pub const DEFAULT_VOICE_DESCRIPTION: &str = "Doctor voice clone";

/// 音色身份聚合根
///
/// 不变量:
/// - id 由外部语音服务分配，本地原样保存
/// - 创建后不可修改，只能整体删除
/// - 原始样本音频在注册完成后不再保留，只记录暂存时的文件名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceIdentity {
    id: VoiceId,
    display_name: VoiceName,
    description: String,
    source_file_name: String,
    created_at: DateTime<Utc>,
}

impl VoiceIdentity {
    /// 注册成功后创建音色身份
    ///
    /// 空白描述按缺省处理
    pub fn new(
        id: VoiceId,
        display_name: VoiceName,
        description: Option<String>,
        source_file_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            display_name,
            description: resolve_description(description),
            source_file_name: source_file_name.into(),
            created_at: Utc::now(),
        }
    }

    // Getters
    pub fn id(&self) -> &VoiceId {
        &self.id
    }

    pub fn display_name(&self) -> &VoiceName {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn source_file_name(&self) -> &str {
        &self.source_file_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// 解析描述：None 或空白字符串取默认值
pub fn resolve_description(description: Option<String>) -> String {
    description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_VOICE_DESCRIPTION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_identity_creation() {
        let voice = VoiceIdentity::new(
            VoiceId::new("v-001").unwrap(),
            VoiceName::new("Dr. Smith").unwrap(),
            Some("Calm tone".to_string()),
            "1700000000000-sample.wav",
        );

        assert_eq!(voice.id().as_str(), "v-001");
        assert_eq!(voice.display_name().as_str(), "Dr. Smith");
        assert_eq!(voice.description(), "Calm tone");
        assert_eq!(voice.source_file_name(), "1700000000000-sample.wav");
    }

    #[test]
    fn test_default_description_applied() {
        assert_eq!(resolve_description(None), DEFAULT_VOICE_DESCRIPTION);
        assert_eq!(
            resolve_description(Some(String::new())),
            DEFAULT_VOICE_DESCRIPTION
        );
        assert_eq!(resolve_description(Some("  ".into())), DEFAULT_VOICE_DESCRIPTION);
    }
}
