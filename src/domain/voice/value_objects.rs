//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// 音色唯一标识
///
/// 由外部语音服务在注册时分配，原样保存，本地不做任何解析
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Result<Self, &'static str> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("音色 ID 不能为空");
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音色显示名称（医生姓名）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceName(String);

impl VoiceName {
    pub fn new(name: impl Into<String>) -> Result<Self, &'static str> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("音色名称不能为空");
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 判断声明的媒体类型是否为音频
pub fn is_audio_mime(mime: &str) -> bool {
    mime.trim().to_lowercase().starts_with("audio/")
}

/// 合成参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// 稳定性 (0.0 - 1.0)，越高越一致，越低越有表现力
    pub stability: f32,
    /// 相似度增强 (0.0 - 1.0)，越高越接近原始音色
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.5,
        }
    }
}

impl VoiceSettings {
    pub fn new(stability: f32, similarity_boost: f32) -> Result<Self, &'static str> {
        let settings = Self {
            stability,
            similarity_boost,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !(0.0..=1.0).contains(&self.stability) {
            return Err("stability must be between 0.0 and 1.0");
        }
        if !(0.0..=1.0).contains(&self.similarity_boost) {
            return Err("similarityBoost must be between 0.0 and 1.0");
        }
        Ok(())
    }

    /// 用请求中的可选值覆盖默认值
    pub fn with_overrides(
        self,
        stability: Option<f32>,
        similarity_boost: Option<f32>,
    ) -> Result<Self, &'static str> {
        Self::new(
            stability.unwrap_or(self.stability),
            similarity_boost.unwrap_or(self.similarity_boost),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_id_rejects_blank() {
        assert!(VoiceId::new("").is_err());
        assert!(VoiceId::new("   ").is_err());
        assert_eq!(VoiceId::new("abc123").unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_audio_mime_detection() {
        assert!(is_audio_mime("audio/wav"));
        assert!(is_audio_mime("Audio/MPEG"));
        assert!(!is_audio_mime("text/plain"));
        assert!(!is_audio_mime(""));
    }

    #[test]
    fn test_voice_settings_overrides() {
        let defaults = VoiceSettings::default();
        let settings = defaults.with_overrides(Some(0.8), None).unwrap();
        assert_eq!(settings.stability, 0.8);
        assert_eq!(settings.similarity_boost, 0.5);

        assert!(defaults.with_overrides(Some(1.5), None).is_err());
        assert!(defaults.with_overrides(None, Some(-0.1)).is_err());
    }
}
