//! 档案 Store
//!
//! 持有一份内存中的档案记录，启动时从持久化存储加载（hydration），
//! 对外提供读取、部分更新和重置。内存状态总是先于存储更新，
//! 持久化失败只记录日志，不回滚内存，也不返回给调用方。

mod errors;
mod writer;

pub use errors::SyncError;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use crate::config::StoreConfig;
use crate::profile::{demo_profile, ProfilePatch, ProfileRecord};
use crate::storage::KeyValueStorage;
use writer::{spawn_writer, PersistOp};

/// 档案 Store 句柄
///
/// 克隆代价很低，所有克隆共享同一份状态。进程启动时创建一次，
/// 传给所有需要读写档案的组件。
#[derive(Clone)]
pub struct ProfileStore {
    inner: Arc<Inner>,
}

struct Inner {
    config: StoreConfig,
    storage: Arc<dyn KeyValueStorage>,
    /// 当前记录，整体替换
    record: watch::Sender<Arc<ProfileRecord>>,
    /// true 表示仍在 hydration
    hydrating: watch::Sender<bool>,
    initialized: AtomicBool,
    persist_tx: mpsc::UnboundedSender<PersistOp>,
}

impl ProfileStore {
    /// 创建 Store 并启动后台持久化任务
    ///
    /// 必须在 tokio runtime 中调用。创建后记录为全空默认值，
    /// 需要调用 [`ProfileStore::initialize`] 完成 hydration。
    pub fn new(storage: Arc<dyn KeyValueStorage>, config: StoreConfig) -> Self {
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        spawn_writer(storage.clone(), config.storage_key.clone(), persist_rx);

        let (record, _) = watch::channel(Arc::new(ProfileRecord::default()));
        let (hydrating, _) = watch::channel(true);

        Self {
            inner: Arc::new(Inner {
                config,
                storage,
                record,
                hydrating,
                initialized: AtomicBool::new(false),
                persist_tx,
            }),
        }
    }

    /// 创建并完成 hydration
    pub async fn open(storage: Arc<dyn KeyValueStorage>, config: StoreConfig) -> Self {
        let store = Self::new(storage, config);
        store.initialize().await;
        store
    }

    // ═══════════════════════════════════════════════════════════════
    // Hydration
    // ═══════════════════════════════════════════════════════════════

    /// 从存储加载档案
    ///
    /// - 有存储数据：合并到默认记录上（缺失字段保持默认）
    /// - 无存储数据且开启演示模式：使用演示档案并立即持久化
    /// - 否则保持默认记录，不写存储
    ///
    /// 读取或解析失败按"无存储数据"处理。只执行一次，之后的调用直接返回。
    pub async fn initialize(&self) {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            warn!("profile store already initialized, ignoring");
            return;
        }

        match self.load().await {
            Ok(Some(record)) => {
                info!(filled = record.filled_count(), "profile hydrated from storage");
                self.inner.record.send_replace(Arc::new(record));
            }
            Ok(None) => self.seed_missing().await,
            Err(e) => {
                error!(error = %e, "Error loading profile data");
                self.seed_missing().await;
            }
        }

        self.inner.hydrating.send_replace(false);
    }

    async fn load(&self) -> Result<Option<ProfileRecord>, SyncError> {
        let key = &self.inner.config.storage_key;

        let stored = self
            .inner
            .storage
            .get_item(key)
            .await
            .map_err(|source| SyncError::StorageRead {
                key: key.clone(),
                source,
            })?;

        // 空字符串与不存在等价
        let raw = match stored {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };

        let parse_error = |source: serde_json::Error| SyncError::StorageParse {
            key: key.clone(),
            source,
        };

        // 只接受 JSON 对象，数组、null、字符串等都视为解析失败
        let object: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&raw).map_err(parse_error)?;
        let record = serde_json::from_value(serde_json::Value::Object(object)).map_err(parse_error)?;
        Ok(Some(record))
    }

    async fn seed_missing(&self) {
        if !self.inner.config.demo_mode {
            debug!("no stored profile, starting empty");
            return;
        }

        info!("no stored profile, seeding demo profile");
        let demo = Arc::new(demo_profile());
        self.inner.record.send_replace(demo.clone());
        self.enqueue(PersistOp::Write(demo));
        self.flush().await;
    }

    /// hydration 是否仍在进行
    pub fn is_hydrating(&self) -> bool {
        *self.inner.hydrating.borrow()
    }

    /// 等待 hydration 完成
    pub async fn wait_hydrated(&self) {
        let mut rx = self.inner.hydrating.subscribe();
        let _ = rx.wait_for(|hydrating| !*hydrating).await;
    }

    // ═══════════════════════════════════════════════════════════════
    // 读写
    // ═══════════════════════════════════════════════════════════════

    /// 当前记录快照
    pub fn read(&self) -> Arc<ProfileRecord> {
        self.inner.record.borrow().clone()
    }

    /// 订阅记录变更，每次替换都会通知
    pub fn subscribe(&self) -> watch::Receiver<Arc<ProfileRecord>> {
        self.inner.record.subscribe()
    }

    /// 部分更新
    ///
    /// 内存记录立即替换为合并结果，持久化在后台进行。
    pub fn update(&self, patch: ProfilePatch) {
        debug!(fields = patch.len(), "updating profile");
        self.inner.record.send_modify(|current| {
            let merged = Arc::new(current.merge(&patch));
            *current = merged.clone();
            // 持锁入队，保证队列顺序与内存替换顺序一致
            self.enqueue(PersistOp::Write(merged));
        });
    }

    /// 重置为默认记录并删除存储中的数据
    pub fn reset(&self) {
        info!("resetting profile");
        self.inner.record.send_modify(|current| {
            *current = Arc::new(ProfileRecord::default());
            self.enqueue(PersistOp::Delete);
        });
    }

    /// 等待之前发起的持久化操作全部执行完
    ///
    /// 存储错误已在后台记录，这里不会返回。
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.inner.persist_tx.send(PersistOp::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }

    fn enqueue(&self, op: PersistOp) {
        if self.inner.persist_tx.send(op).is_err() {
            warn!("profile writer is gone, change kept in memory only");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// 测试
// ═══════════════════════════════════════════════════════════════════
