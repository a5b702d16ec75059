//! Voice Provider Port - 外部语音合成服务抽象
//!
//! 定义音色注册、语音合成、音色删除三个操作，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::{VoiceId, VoiceSettings};

/// 语音服务错误
///
/// 区分两类失败：
/// - 传输失败：没有拿到响应（连接失败、超时等）
/// - 服务端错误：拿到了非 2xx 响应，status/body 原样保留用于日志
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// HTTP 状态码（仅服务端错误有）
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 是否为传输层失败（未收到响应）
    pub fn is_transport(&self) -> bool {
        matches!(self, ProviderError::Transport(_) | ProviderError::Timeout)
    }
}

/// 音色注册请求
#[derive(Debug, Clone)]
pub struct RegisterVoiceRequest {
    pub display_name: String,
    pub description: String,
    /// 样本文件名（multipart 中的 filename）
    pub file_name: String,
    /// 样本的 MIME 类型
    pub mime_type: String,
    pub audio: Vec<u8>,
}

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SynthesizeRequest {
    pub voice_id: VoiceId,
    pub text: String,
    pub settings: VoiceSettings,
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    /// 原始音频数据（MP3）
    pub data: Vec<u8>,
    /// 响应的 Content-Type（如有）
    pub content_type: Option<String>,
}

/// Voice Provider Port
///
/// 每次调用都会附带共享凭证；不做重试
#[async_trait]
pub trait VoiceProviderPort: Send + Sync {
    /// 注册音色，返回服务端分配的 ID
    async fn register_voice(&self, request: RegisterVoiceRequest) -> Result<VoiceId, ProviderError>;

    /// 合成语音，返回原始音频字节
    async fn synthesize(&self, request: SynthesizeRequest) -> Result<SynthesizedAudio, ProviderError>;

    /// 删除音色
    async fn delete_voice(&self, voice_id: &VoiceId) -> Result<(), ProviderError>;
}
