//! 同步错误
//!
//! 这些错误都不会返回给调用方：在发生处记录日志后按缺省行为继续。

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to read {key}: {source}")]
    StorageRead {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("failed to parse stored {key}: {source}")]
    StorageParse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {key}: {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("failed to delete {key}: {source}")]
    StorageDelete {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("failed to encode profile: {0}")]
    Encode(#[from] serde_json::Error),
}
