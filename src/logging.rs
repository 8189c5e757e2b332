//! 日志初始化

use tracing_subscriber::EnvFilter;

/// 默认日志级别，可用 RUST_LOG 覆盖
const DEFAULT_FILTER: &str = "profile_store=warn";

/// 安装 tracing subscriber，输出到 stderr（stdout 留给命令输出）
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("profile_store=debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    // 重复初始化（例如测试中）忽略
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
