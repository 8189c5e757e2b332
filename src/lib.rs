// Profile Store - Library Root
//
// 基于 key-value 存储的用户档案 Store，带演示数据引导

pub mod cli;
pub mod config;
pub mod live_demo;
pub mod logging;
pub mod profile;
pub mod storage;
pub mod store;
pub mod utils;

// 重新导出常用类型
pub use config::StoreConfig;
pub use profile::{ProfileField, ProfilePatch, ProfileRecord};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::ProfileStore;
