//! Asset Store Port - 出站端口
//!
//! 管理两类文件：
//! - 暂存区：上传的样本音频，交给语音服务后立即删除
//! - 内容区：合成的音频，进程生命周期内保留并对外提供访问

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// 资源存储错误
#[derive(Debug, Error)]
pub enum AssetStoreError {
    #[error("Invalid media type: {0}")]
    InvalidMediaType(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 暂存文件句柄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// 暂存区中的文件路径
    pub path: PathBuf,
    /// 暂存文件名（时间戳 + 原始文件名）
    pub file_name: String,
    /// 上传时的原始文件名
    pub original_name: String,
    /// 声明的 MIME 类型
    pub mime_type: String,
    /// 文件大小（字节）
    pub size: u64,
}

/// 已持久化的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFile {
    /// 内容区中的相对文件名
    pub file_name: String,
    /// 内容区中的文件路径
    pub path: PathBuf,
}

/// Asset Store Port - 出站端口
#[async_trait]
pub trait AssetStorePort: Send + Sync {
    /// 暂存上传的音频
    ///
    /// 声明的媒体类型不是音频时直接拒绝，不写入任何字节
    async fn stage_upload(
        &self,
        data: &[u8],
        original_name: &str,
        mime_type: &str,
    ) -> Result<StagedFile, AssetStoreError>;

    /// 读取暂存文件内容
    async fn read_staged(&self, file: &StagedFile) -> Result<Vec<u8>, AssetStoreError>;

    /// 删除暂存文件（文件已不存在视为成功）
    async fn discard(&self, file: &StagedFile) -> Result<(), AssetStoreError>;

    /// 将合成的音频写入内容区，文件名每次都是新生成的
    async fn persist(&self, data: &[u8], extension: &str) -> Result<PersistedFile, AssetStoreError>;

    /// 暂存区当前的文件数量
    async fn staged_count(&self) -> Result<usize, AssetStoreError>;
}
