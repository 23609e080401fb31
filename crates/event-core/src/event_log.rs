//! 内存事件日志

use chrono::{DateTime, Utc};
use inv_errors::AppResult;
use inv_ports::{GatewayEvent, GatewayEventKind};
use parking_lot::Mutex;

use crate::EventHandler;

/// 已接收的通知
#[derive(Debug, Clone)]
pub struct ReceivedEvent {
    pub event: GatewayEvent,
    pub received_at: DateTime<Utc>,
}

/// 内存事件日志，记录所有收到的通知
#[derive(Default)]
pub struct InMemoryEventLog {
    events: Mutex<Vec<ReceivedEvent>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取所有事件
    pub fn get_events(&self) -> Vec<ReceivedEvent> {
        self.events.lock().clone()
    }

    /// 按类型计数
    pub fn count(&self, kind: GatewayEventKind) -> usize {
        self.events.lock()
            .iter()
            .filter(|received| received.event.kind() == kind)
            .count()
    }

    /// 清空事件
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventHandler for InMemoryEventLog {
    fn name(&self) -> &'static str {
        "in-memory-log"
    }

    fn handle(&self, event: &GatewayEvent) -> AppResult<()> {
        self.events.lock().push(ReceivedEvent {
            event: *event,
            received_at: Utc::now(),
        });
        Ok(())
    }
}
