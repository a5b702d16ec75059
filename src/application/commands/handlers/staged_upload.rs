//! 暂存文件守卫
//!
//! 持有暂存文件直到被显式释放；未释放就被 drop 时（panic、请求 future 被取消）
//! 在当前 tokio runtime 上补做删除

use std::sync::Arc;

use crate::application::ports::{AssetStorePort, StagedFile};

pub struct StagedUpload {
    store: Arc<dyn AssetStorePort>,
    file: StagedFile,
    released: bool,
}

impl StagedUpload {
    pub fn new(store: Arc<dyn AssetStorePort>, file: StagedFile) -> Self {
        Self {
            store,
            file,
            released: false,
        }
    }

    pub fn file(&self) -> &StagedFile {
        &self.file
    }

    /// 删除暂存文件
    ///
    /// 删除失败只记录日志：此时外部调用已经结束，结果不应被清理失败覆盖
    pub async fn release(mut self) {
        self.released = true;
        match self.store.discard(&self.file).await {
            Ok(()) => {
                tracing::debug!(file = %self.file.file_name, "Staged upload discarded");
            }
            Err(e) => {
                tracing::warn!(
                    file = %self.file.file_name,
                    error = %e,
                    "Failed to discard staged upload"
                );
            }
        }
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let store = self.store.clone();
        let file = self.file.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::debug!(file = %file.file_name, "Staged upload dropped, discarding in background");
                handle.spawn(async move {
                    if let Err(e) = store.discard(&file).await {
                        tracing::warn!(file = %file.file_name, error = %e, "Failed to discard staged upload");
                    }
                });
            }
            Err(_) => {
                tracing::warn!(
                    file = %file.file_name,
                    "Staged upload dropped outside of a runtime, file left in staging area"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::FileAssetStore;
    use std::time::Duration;

    async fn staged(store: &Arc<FileAssetStore>) -> StagedFile {
        store
            .stage_upload(b"RIFF....WAVE", "sample.wav", "audio/wav")
            .await
            .unwrap()
    }

    /// 等待后台删除任务执行完毕
    async fn wait_until_empty(store: &FileAssetStore) -> usize {
        for _ in 0..100 {
            let count = store.staged_count().await.unwrap();
            if count == 0 {
                return 0;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        store.staged_count().await.unwrap()
    }

    #[tokio::test]
    async fn test_release_discards_file() {
        let temp = tempfile::tempdir().unwrap();
        let store = Arc::new(
            FileAssetStore::new(temp.path().join("staging"), temp.path().join("uploads"))
                .await
                .unwrap(),
        );

        let file = staged(&store).await;
        let guard = StagedUpload::new(store.clone(), file.clone());
        assert_eq!(guard.file().file_name, file.file_name);

        guard.release().await;
        assert!(!file.path.exists());
        assert_eq!(store.staged_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_drop_without_release_discards_in_background() {
        let temp = tempfile::tempdir().unwrap();
        let store = Arc::new(
            FileAssetStore::new(temp.path().join("staging"), temp.path().join("uploads"))
                .await
                .unwrap(),
        );

        let file = staged(&store).await;
        drop(StagedUpload::new(store.clone(), file.clone()));

        assert_eq!(wait_until_empty(&store).await, 0);
        assert!(!file.path.exists());
    }

    #[tokio::test]
    async fn test_drop_of_cancelled_future_discards_file() {
        let temp = tempfile::tempdir().unwrap();
        let store = Arc::new(
            FileAssetStore::new(temp.path().join("staging"), temp.path().join("uploads"))
                .await
                .unwrap(),
        );

        let file = staged(&store).await;
        let guard = StagedUpload::new(store.clone(), file.clone());
        let pending = tokio::spawn(async move {
            let _guard = guard;
            std::future::pending::<()>().await;
        });
        tokio::task::yield_now().await;
        pending.abort();
        let _ = pending.await;

        assert_eq!(wait_until_empty(&store).await, 0);
    }

    #[test]
    fn test_drop_outside_runtime_keeps_file() {
        let temp = tempfile::tempdir().unwrap();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let (store, file) = runtime.block_on(async {
            let store = Arc::new(
                FileAssetStore::new(temp.path().join("staging"), temp.path().join("uploads"))
                    .await
                    .unwrap(),
            );
            let file = staged(&store).await;
            (store, file)
        });

        drop(StagedUpload::new(store.clone(), file.clone()));

        assert!(file.path.exists());
    }
}
