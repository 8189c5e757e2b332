//! CLI 命令实现

pub mod profile;

pub use profile::*;
