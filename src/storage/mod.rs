//! 持久化存储层
//!
//! 单个 key 对应单个字符串值的异步 key-value 存储。
//! 档案 store 只用到读、整值覆盖写和删除三种操作。

pub mod file;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// 存储后端错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// 异步 key-value 存储
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// 读取 key，不存在时返回 None
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// 覆盖写入整个值
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// 删除 key，不存在视为成功
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
