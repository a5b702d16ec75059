//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 音色身份
//! - Message Context: 语音消息

pub mod message;
pub mod voice;
