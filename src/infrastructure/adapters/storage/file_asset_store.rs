//! File Asset Store - 文件系统资源存储实现
//!
//! 实现 AssetStorePort trait
//!
//! - 暂存区: `{staging_dir}/{毫秒时间戳}-{随机后缀}-{原始文件名}`
//! - 内容区: `{content_dir}/message-{毫秒时间戳}-{随机后缀}.{ext}`

use async_trait::async_trait;
use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::application::ports::{AssetStoreError, AssetStorePort, PersistedFile, StagedFile};
use crate::domain::voice::is_audio_mime;

/// 文件系统资源存储
pub struct FileAssetStore {
    /// 上传暂存目录
    staging_dir: PathBuf,
    /// 合成音频目录（对外提供访问）
    content_dir: PathBuf,
}

impl FileAssetStore {
    /// 创建新的文件存储，确保两个目录都存在
    pub async fn new(
        staging_dir: impl AsRef<Path>,
        content_dir: impl AsRef<Path>,
    ) -> Result<Self, AssetStoreError> {
        let staging_dir = staging_dir.as_ref().to_path_buf();
        let content_dir = content_dir.as_ref().to_path_buf();

        for dir in [&staging_dir, &content_dir] {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| AssetStoreError::IoError(e.to_string()))?;
        }

        Ok(Self {
            staging_dir,
            content_dir,
        })
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// 以 create_new 方式写入，文件已存在时报错而不是覆盖
    async fn write_new(path: &Path, data: &[u8]) -> Result<(), AssetStoreError> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
            .map_err(|e| AssetStoreError::IoError(format!("{}: {}", path.display(), e)))?;
        file.write_all(data)
            .await
            .map_err(|e| AssetStoreError::IoError(format!("{}: {}", path.display(), e)))?;
        file.flush()
            .await
            .map_err(|e| AssetStoreError::IoError(e.to_string()))?;
        Ok(())
    }
}

/// 唯一文件名前缀：毫秒时间戳 + 8 位随机十六进制
fn unique_stamp() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", Utc::now().timestamp_millis(), &suffix[..8])
}

/// 只保留文件名部分，去掉路径分隔符等不安全字符
fn sanitize_file_name(original: &str) -> String {
    let base = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

#[async_trait]
impl AssetStorePort for FileAssetStore {
    async fn stage_upload(
        &self,
        data: &[u8],
        original_name: &str,
        mime_type: &str,
    ) -> Result<StagedFile, AssetStoreError> {
        if !is_audio_mime(mime_type) {
            return Err(AssetStoreError::InvalidMediaType(mime_type.to_string()));
        }

        let file_name = format!("{}-{}", unique_stamp(), sanitize_file_name(original_name));
        let path = self.staging_dir.join(&file_name);
        Self::write_new(&path, data).await?;

        tracing::debug!(
            file = %file_name,
            mime_type = %mime_type,
            size = data.len(),
            "Upload staged"
        );

        Ok(StagedFile {
            path,
            file_name,
            original_name: original_name.to_string(),
            mime_type: mime_type.to_string(),
            size: data.len() as u64,
        })
    }

    async fn read_staged(&self, file: &StagedFile) -> Result<Vec<u8>, AssetStoreError> {
        fs::read(&file.path)
            .await
            .map_err(|e| AssetStoreError::IoError(format!("{}: {}", file.path.display(), e)))
    }

    async fn discard(&self, file: &StagedFile) -> Result<(), AssetStoreError> {
        match fs::remove_file(&file.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AssetStoreError::IoError(format!(
                "{}: {}",
                file.path.display(),
                e
            ))),
        }
    }

    async fn persist(&self, data: &[u8], extension: &str) -> Result<PersistedFile, AssetStoreError> {
        let extension = extension.trim_start_matches('.');
        let file_name = format!("message-{}.{}", unique_stamp(), extension);
        let path = self.content_dir.join(&file_name);
        Self::write_new(&path, data).await?;

        tracing::debug!(file = %file_name, size = data.len(), "Audio persisted");

        Ok(PersistedFile { file_name, path })
    }

    async fn staged_count(&self) -> Result<usize, AssetStoreError> {
        let mut count = 0;
        let mut entries = fs::read_dir(&self.staging_dir)
            .await
            .map_err(|e| AssetStoreError::IoError(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AssetStoreError::IoError(e.to_string()))?
        {
            if entry.path().is_file() {
                count += 1;
            }
        }

        Ok(count)
    }
}
