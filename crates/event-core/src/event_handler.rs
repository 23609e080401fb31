//! Event Handler 定义

use inv_errors::AppResult;
use inv_ports::GatewayEvent;
use tracing::info;

/// 通知观察者
///
/// 只观察，不改变请求序列的状态
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EventHandler: Send + Sync {
    /// 观察者名称，用于日志
    fn name(&self) -> &'static str;

    /// 处理一条通知
    fn handle(&self, event: &GatewayEvent) -> AppResult<()>;
}

/// 日志观察者：每收到一条通知记录一行
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn handle(&self, event: &GatewayEvent) -> AppResult<()> {
        match event.handle() {
            Some(handle) => info!(handle = %handle, "Received {} callback", event.event_type()),
            None => info!("Received {} callback", event.event_type()),
        }
        Ok(())
    }
}
