//! 后台持久化任务
//!
//! 所有写入/删除通过一个无界队列交给单个后台任务按顺序执行，
//! 调用方入队后立即返回。队列中被后续操作覆盖的写入/删除会被合并掉。

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::SyncError;
use crate::profile::ProfileRecord;
use crate::storage::KeyValueStorage;

/// 持久化操作
#[derive(Debug)]
pub(crate) enum PersistOp {
    /// 覆盖写入完整记录
    Write(Arc<ProfileRecord>),
    /// 删除存储中的记录
    Delete,
    /// 之前入队的操作全部处理后通知
    Flush(oneshot::Sender<()>),
}

pub(crate) fn spawn_writer(
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    rx: mpsc::UnboundedReceiver<PersistOp>,
) -> JoinHandle<()> {
    tokio::spawn(run(storage, key, rx))
}

async fn run(
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    mut rx: mpsc::UnboundedReceiver<PersistOp>,
) {
    while let Some(op) = rx.recv().await {
        let mut pending = match op {
            PersistOp::Flush(done) => {
                let _ = done.send(());
                continue;
            }
            op => op,
        };

        // 合并已经排队的操作，遇到 Flush 为止
        let mut waiters = Vec::new();
        let mut superseded = 0usize;
        while let Ok(next) = rx.try_recv() {
            match next {
                PersistOp::Flush(done) => {
                    waiters.push(done);
                    break;
                }
                op => {
                    pending = op;
                    superseded += 1;
                }
            }
        }
        if superseded > 0 {
            debug!(superseded, "coalesced queued persist operations");
        }

        if let Err(e) = apply(storage.as_ref(), &key, pending).await {
            error!(error = %e, "Error persisting profile data");
        }

        for done in waiters {
            let _ = done.send(());
        }
    }

    debug!("profile writer stopped");
}

async fn apply(storage: &dyn KeyValueStorage, key: &str, op: PersistOp) -> Result<(), SyncError> {
    match op {
        PersistOp::Write(record) => {
            let payload = serde_json::to_string(record.as_ref())?;
            storage
                .set_item(key, &payload)
                .await
                .map_err(|source| SyncError::StorageWrite {
                    key: key.to_string(),
                    source,
                })?;
            debug!(key, filled = record.filled_count(), "profile persisted");
        }
        PersistOp::Delete => {
            storage
                .remove_item(key)
                .await
                .map_err(|source| SyncError::StorageDelete {
                    key: key.to_string(),
                    source,
                })?;
            debug!(key, "profile removed from storage");
        }
        PersistOp::Flush(done) => {
            let _ = done.send(());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ProfileField, ProfilePatch};
    use crate::storage::MemoryStorage;

    fn record(name: &str) -> Arc<ProfileRecord> {
        Arc::new(ProfileRecord::default().merge(&ProfilePatch::new().with(ProfileField::Name, name)))
    }

    #[tokio::test]
    async fn test_writer_applies_in_order() {
        let storage = Arc::new(MemoryStorage::new());
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_writer(storage.clone(), "k".to_string(), rx);

        tx.send(PersistOp::Write(record("first"))).unwrap();
        tx.send(PersistOp::Delete).unwrap();
        tx.send(PersistOp::Write(record("last"))).unwrap();

        let (done_tx, done_rx) = oneshot::channel();
        tx.send(PersistOp::Flush(done_tx)).unwrap();
        done_rx.await.unwrap();

        let stored: ProfileRecord = serde_json::from_str(&storage.peek("k").await.unwrap()).unwrap();
        assert_eq!(stored.name, "last");
        assert!(storage.write_count() >= 1);

        // 发送端全部关闭后任务退出
        drop(tx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_write_failure_does_not_stop_writer() {
        let storage = Arc::new(MemoryStorage::new());
        let (tx, rx) = mpsc::unbounded_channel();
        spawn_writer(storage.clone(), "k".to_string(), rx);

        storage.fail_writes(true);
        tx.send(PersistOp::Write(record("lost"))).unwrap();
        let (done_tx, done_rx) = oneshot::channel();
        tx.send(PersistOp::Flush(done_tx)).unwrap();
        done_rx.await.unwrap();
        assert_eq!(storage.peek("k").await, None);

        storage.fail_writes(false);
        tx.send(PersistOp::Write(record("kept"))).unwrap();
        let (done_tx, done_rx) = oneshot::channel();
        tx.send(PersistOp::Flush(done_tx)).unwrap();
        done_rx.await.unwrap();
        assert!(storage.peek("k").await.unwrap().contains("kept"));
    }
}
