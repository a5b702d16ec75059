//! Message Context - Value Objects

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// 语音消息唯一标识
///
/// 基于毫秒时间戳，同一进程内严格递增
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// MessageId 生成器
///
/// 取当前毫秒时间戳；同一毫秒内（或时钟回拨时）在上一个 ID 基础上加一
#[derive(Debug, Default)]
pub struct MessageIdGenerator {
    last: AtomicU64,
}

impl MessageIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> MessageId {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(current + 1);
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return MessageId(candidate),
                Err(actual) => current = actual,
            }
        }
    }
}

/// 可扫描的访问码（二维码 PNG 的 data URL）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScannableCode(String);

impl ScannableCode {
    pub fn new(encoded: impl Into<String>) -> Result<Self, &'static str> {
        let encoded = encoded.into();
        if encoded.is_empty() {
            return Err("访问码不能为空");
        }
        Ok(Self(encoded))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids_strictly_increase() {
        let generator = MessageIdGenerator::new();
        let mut previous = generator.next_id();
        for _ in 0..1000 {
            let id = generator.next_id();
            assert!(id > previous);
            previous = id;
        }
    }

    #[test]
    fn test_scannable_code_rejects_empty() {
        assert!(ScannableCode::new("").is_err());
        assert!(ScannableCode::new("data:image/png;base64,AAAA").is_ok());
    }
}
