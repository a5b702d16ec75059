//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色身份（外部服务分配的 ID + 显示信息）
//! - 合成参数
//! - 音频格式识别

mod aggregate;
mod value_objects;

pub use aggregate::{resolve_description, VoiceIdentity, DEFAULT_VOICE_DESCRIPTION};
pub use value_objects::{is_audio_mime, VoiceId, VoiceName, VoiceSettings};
