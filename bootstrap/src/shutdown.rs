//! 退出控制

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;
use tracing::info;

/// 退出控制器
///
/// 交互驱动通过它请求退出，回调泵循环在下一轮检查到后结束
#[derive(Clone, Default)]
pub struct ShutdownController {
    requested: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求退出
    pub fn shutdown(&self) {
        if !self.requested.swap(true, Ordering::SeqCst) {
            info!("Exit requested");
        }
        self.notify.notify_waiters();
    }

    /// 是否已请求退出
    pub fn is_shutdown(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// 等待退出请求
    pub async fn wait(&self) {
        let notified = self.notify.notified();
        if self.is_shutdown() {
            return;
        }
        notified.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_is_shared_between_clones() {
        let controller = ShutdownController::new();
        let driver_side = controller.clone();
        assert!(!controller.is_shutdown());

        driver_side.shutdown();
        assert!(controller.is_shutdown());
        // 重复请求无副作用
        driver_side.shutdown();
        assert!(controller.is_shutdown());
    }

    #[tokio::test]
    async fn test_wait_returns_after_shutdown() {
        let controller = ShutdownController::new();
        controller.shutdown();
        controller.wait().await;
    }
}
