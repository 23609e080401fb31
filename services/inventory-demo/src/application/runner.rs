//! 回调泵目标

use std::sync::Arc;

use inv_adapter_simulated::SimulatedInventoryService;
use inv_bootstrap::{PumpTarget, ShutdownController};
use inv_config::AppConfig;
use inv_errors::AppResult;
use inv_event_core::{InMemoryEventLog, LoggingEventHandler};
use inv_orchestration::{NotificationDispatcher, PropertyReader};
use inv_ports::InventoryGateway;
use tracing::info;

use super::InventoryDemo;
use crate::console::Console;

/// 演示宿主加通知分发器，由回调泵驱动
pub struct DemoRunner {
    demo: InventoryDemo,
    dispatcher: NotificationDispatcher,
    events: Arc<InMemoryEventLog>,
}

impl DemoRunner {
    /// 按配置创建模拟网关并发起第一个请求
    pub fn start(
        config: &AppConfig,
        console: Box<dyn Console>,
        shutdown: ShutdownController,
    ) -> AppResult<Self> {
        let gateway = Arc::new(SimulatedInventoryService::from_config(&config.gateway));
        info!(
            items = config.gateway.inventory.len(),
            definitions = config.gateway.definitions.len(),
            "Simulated inventory service initialized"
        );

        let properties = PropertyReader::new(
            config.properties.buffer_capacity,
            config.properties.catalog_delimiter,
        );
        Self::with_gateway(gateway, properties, console, shutdown)
    }

    /// 使用给定网关创建并发起第一个请求
    pub fn with_gateway(
        gateway: Arc<dyn InventoryGateway>,
        properties: PropertyReader,
        console: Box<dyn Console>,
        shutdown: ShutdownController,
    ) -> AppResult<Self> {
        let mut demo = InventoryDemo::new(gateway, properties, console, shutdown);
        demo.run_demo()?;

        let events = Arc::new(InMemoryEventLog::new());
        let dispatcher = NotificationDispatcher::new()
            .with_observer(Arc::new(LoggingEventHandler))
            .with_observer(events.clone());
        Ok(Self {
            demo,
            dispatcher,
            events,
        })
    }

    pub fn demo(&self) -> &InventoryDemo {
        &self.demo
    }

    /// 已收到的全部通知
    pub fn events(&self) -> &InMemoryEventLog {
        &self.events
    }
}

impl PumpTarget for DemoRunner {
    fn pump(&mut self) -> AppResult<usize> {
        self.dispatcher.pump(&mut self.demo)
    }
}
