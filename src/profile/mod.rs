//! 档案模块
//!
//! 档案记录的数据模型和演示数据

pub mod demo;
pub mod models;

// 重导出
pub use demo::demo_profile;
pub use models::*;
