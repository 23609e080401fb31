//! 回调泵循环

use std::time::Duration;

use inv_errors::AppResult;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::shutdown::ShutdownController;

/// 由回调泵周期性驱动的目标
pub trait PumpTarget {
    /// 投递一轮就绪通知，返回投递条数
    fn pump(&mut self) -> AppResult<usize>;
}

/// 循环统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpReport {
    pub pumps: u64,
    pub delivered: u64,
}

/// 周期性调用 `target.pump()`，直到请求退出
///
/// 单线程协作模型：每一轮 pump 同步完成，错误立即结束循环并向上传播。
/// 后续步骤可能阻塞在控制台读取上，因此不接管 SIGINT，Ctrl+C 保持默认的进程终止行为。
pub async fn run_pump_loop<T: PumpTarget>(
    target: &mut T,
    interval: Duration,
    shutdown: &ShutdownController,
) -> AppResult<PumpReport> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut pumps = 0u64;
    let mut delivered = 0u64;

    while !shutdown.is_shutdown() {
        tokio::select! {
            _ = ticker.tick() => {
                let count = target.pump()?;
                pumps += 1;
                delivered += count as u64;
                if count > 0 {
                    debug!(count, "Callbacks delivered");
                }
            }
            _ = shutdown.wait() => {}
        }
    }

    info!(pumps, delivered, "Pump loop finished");
    Ok(PumpReport {
        pumps,
        delivered,
    })
}
