//! 演示入口
//!
//! 写入演示档案后立即跳转到主界面。跳转不等待持久化完成，
//! 需要确保落盘的调用方自行调用 [`ProfileStore::flush`]。

use tracing::info;

use crate::profile::{demo_profile, ProfilePatch};
use crate::store::ProfileStore;

/// 演示完成后跳转的路由
pub const HOME_ROUTE: &str = "/(tabs)";

/// 页面跳转
pub trait Navigator {
    /// 替换当前页面（不保留返回记录）
    fn replace(&mut self, route: &str);
}

/// 写入演示档案并跳转到主界面
pub fn enter_live_demo<N: Navigator + ?Sized>(store: &ProfileStore, navigator: &mut N) {
    store.update(ProfilePatch::from(demo_profile()));
    info!(route = HOME_ROUTE, "demo profile loaded, redirecting");
    navigator.replace(HOME_ROUTE);
}
