//! Store 配置

use std::path::PathBuf;

/// 档案在存储中的固定 key
pub const STORAGE_KEY: &str = "@profile_data";

/// 演示模式环境变量，仅当值为 "1" 时开启
pub const DEMO_MODE_ENV: &str = "PROFILE_DEMO_MODE";

/// 应用数据目录名
const APP_DIR_NAME: &str = "profile-store";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// 存储 key
    pub storage_key: String,
    /// 首次启动且无存储数据时写入演示档案
    pub demo_mode: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            demo_mode: false,
        }
    }
}

impl StoreConfig {
    /// 从环境变量读取演示模式
    pub fn from_env() -> Self {
        Self {
            demo_mode: demo_mode_enabled(std::env::var(DEMO_MODE_ENV).ok().as_deref()),
            ..Self::default()
        }
    }

    pub fn with_demo_mode(mut self, demo_mode: bool) -> Self {
        self.demo_mode = demo_mode;
        self
    }
}

/// 演示模式判定：只认精确的 "1"
pub fn demo_mode_enabled(value: Option<&str>) -> bool {
    value == Some("1")
}

/// 默认数据目录（平台数据目录下的 profile-store）
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_mode_flag() {
        assert!(demo_mode_enabled(Some("1")));
        assert!(!demo_mode_enabled(Some("true")));
        assert!(!demo_mode_enabled(Some("0")));
        assert!(!demo_mode_enabled(Some("")));
        assert!(!demo_mode_enabled(None));
    }

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "@profile_data");
        assert!(!config.demo_mode);
        assert!(config.with_demo_mode(true).demo_mode);
    }

    #[test]
    fn test_default_data_dir() {
        assert!(default_data_dir().ends_with("profile-store"));
    }
}
