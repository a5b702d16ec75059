//! Message Context - 语音消息限界上下文
//!
//! 职责:
//! - 语音消息记录（合成音频的位置 + 访问码）
//! - 消息 ID 分配

mod aggregate;
mod value_objects;

pub use aggregate::{GeneratedMessage, NewMessage, DEFAULT_PATIENT_NAME, UNKNOWN_VOICE_NAME};
pub use value_objects::{MessageId, MessageIdGenerator, ScannableCode};
