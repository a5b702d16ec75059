//! Locator Encoder Port - 地址 -> 可扫描访问码

use thiserror::Error;

use crate::domain::message::ScannableCode;

/// 编码错误
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("Address is empty")]
    EmptyAddress,

    #[error("Failed to encode address: {0}")]
    Failed(String),
}

/// Locator Encoder Port
///
/// 同一地址多次编码，解码结果必须相同（不要求字节级一致）
pub trait LocatorEncoderPort: Send + Sync {
    fn encode(&self, address: &str) -> Result<ScannableCode, EncodingError>;
}
