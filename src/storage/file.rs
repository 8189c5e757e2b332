//! 文件存储：每个 key 一个 JSON 文件

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use super::{KeyValueStorage, StorageError};
use crate::utils::{key_file_name, remove_file_if_exists, try_read_file, write_file_atomic};

/// 基于目录的文件存储
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// 目录不需要预先存在，首次写入时创建
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// key 对应的文件路径
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key_file_name(key))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        debug!(path = %path.display(), "reading item");
        try_read_file(&path).await.map_err(|e| io_error(key, e))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        debug!(path = %path.display(), bytes = value.len(), "writing item");
        write_file_atomic(&path, value)
            .await
            .map_err(|e| io_error(key, e))
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        debug!(path = %path.display(), "removing item");
        remove_file_if_exists(&path)
            .await
            .map_err(|e| io_error(key, e))
    }
}
