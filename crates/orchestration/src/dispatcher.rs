//! 通知分发器

use std::sync::Arc;

use inv_errors::AppResult;
use inv_event_core::EventHandler;
use inv_ports::{GatewayEvent, ResultHandle};
use inv_telemetry::names;
use tracing::{debug, warn};

use crate::sequencer::{HandleMatch, OperationSequencer};

/// 持有请求序列器的宿主
///
/// 后续步骤以 `&mut H` 运行，因此可以读取结果、更新宿主状态并发起下一个请求
pub trait SequencerHost: Sized {
    fn sequencer(&mut self) -> &mut OperationSequencer<Self>;
}

/// 单条通知的分发结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// 句柄匹配，后续步骤已运行
    ContinuationRun(ResultHandle),
    /// 句柄匹配，但没有待运行的后续步骤
    NoContinuation(ResultHandle),
    /// 句柄与当前持有的不一致，已丢弃
    Mismatch(ResultHandle),
    /// 仅观察的通知
    Observed,
}

/// 通知分发器
#[derive(Default)]
pub struct NotificationDispatcher {
    observers: Vec<Arc<dyn EventHandler>>,
}

impl NotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册观察者
    pub fn with_observer(mut self, observer: Arc<dyn EventHandler>) -> Self {
        self.observers.push(observer);
        self
    }

    fn notify_observers(&self, event: &GatewayEvent) {
        for observer in &self.observers {
            if let Err(e) = observer.handle(event) {
                warn!(observer = observer.name(), error = %e, "Event observer failed");
            }
        }
    }

    /// 分发一条通知
    ///
    /// 后续步骤返回的错误原样向上传播
    pub fn dispatch<H: SequencerHost>(
        &self,
        host: &mut H,
        event: GatewayEvent,
    ) -> AppResult<DispatchOutcome> {
        metrics::counter!(names::NOTIFICATIONS_RECEIVED, "kind" => event.event_type()).increment(1);
        self.notify_observers(&event);

        let GatewayEvent::ResultReady { handle, .. } = event else {
            return Ok(DispatchOutcome::Observed);
        };

        match host.sequencer().take_continuation_for(handle) {
            HandleMatch::Run(continuation) => {
                metrics::counter!(names::CONTINUATIONS_RUN).increment(1);
                debug!(handle = %handle, "Running continuation");
                continuation(host)?;
                Ok(DispatchOutcome::ContinuationRun(handle))
            }
            HandleMatch::AlreadyTaken => {
                debug!(handle = %handle, "Continuation already consumed for handle");
                Ok(DispatchOutcome::NoContinuation(handle))
            }
            HandleMatch::Mismatch { owned } => {
                metrics::counter!(names::HANDLE_MISMATCHES).increment(1);
                warn!(
                    handle = %handle,
                    owned = ?owned,
                    "Handle in callback does not match current handle"
                );
                Ok(DispatchOutcome::Mismatch(handle))
            }
        }
    }

    /// 回调泵：从网关取出所有就绪通知并逐条分发，返回分发条数
    pub fn pump<H: SequencerHost>(&self, host: &mut H) -> AppResult<usize> {
        let gateway = Arc::clone(host.sequencer().gateway());
        let events = gateway.run_callbacks();
        let count = events.len();

        for (index, event) in events.into_iter().enumerate() {
            if let Err(e) = self.dispatch(host, event) {
                let dropped = count - index - 1;
                if dropped > 0 {
                    warn!(dropped, error = %e, "Dropping remaining notifications after failure");
                }
                return Err(e);
            }
        }
        Ok(count)
    }
}
