//! 应用层错误定义
//!
//! 统一的命令/查询错误类型。Display 输出包含完整诊断信息，只用于日志；
//! 返回给终端用户的文本统一走 `user_message()`

use thiserror::Error;

use crate::application::ports::{AssetStoreError, EncodingError, ProviderError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 请求缺少必填字段
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// 上传的附件不是音频
    #[error("Invalid media type: {0}")]
    InvalidMediaType(String),

    /// 本地文件读写失败
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    /// 外部语音服务失败（传输失败或服务端错误）
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// 访问码生成失败
    #[error("Encoding failure: {0}")]
    EncodingFailure(String),

    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },
}

impl ApplicationError {
    /// 创建 MissingInput 错误
    pub fn missing_input(message: impl Into<String>) -> Self {
        Self::MissingInput(message.into())
    }

    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 面向终端用户的提示文本，不包含任何上游诊断信息
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingInput(msg) => msg.clone(),
            Self::InvalidMediaType(_) => "Only audio files are allowed!".to_string(),
            Self::StorageFailure(_) => "Failed to save audio. Please try again.".to_string(),
            Self::ProviderError(_) => {
                "The voice service request failed. Please try again.".to_string()
            }
            Self::EncodingFailure(_) => {
                "Failed to generate access code. Please try again.".to_string()
            }
            Self::NotFound { resource_type, id } => format!("{} not found: {}", resource_type, id),
        }
    }
}

impl From<AssetStoreError> for ApplicationError {
    fn from(err: AssetStoreError) -> Self {
        match err {
            AssetStoreError::InvalidMediaType(mime) => Self::InvalidMediaType(mime),
            AssetStoreError::IoError(msg) => Self::StorageFailure(msg),
        }
    }
}

impl From<ProviderError> for ApplicationError {
    fn from(err: ProviderError) -> Self {
        Self::ProviderError(err.to_string())
    }
}

impl From<EncodingError> for ApplicationError {
    fn from(err: EncodingError) -> Self {
        Self::EncodingFailure(err.to_string())
    }
}
