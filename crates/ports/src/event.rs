//! 网关通知

use crate::{ResultHandle, ResultStatus};

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayEventKind {
    ResultReady,
    InventoryChanged,
    CatalogChanged,
}

impl GatewayEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayEventKind::ResultReady => "ResultReady",
            GatewayEventKind::InventoryChanged => "InventoryChanged",
            GatewayEventKind::CatalogChanged => "CatalogChanged",
        }
    }
}

/// 网关通过 pump 投递的通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayEvent {
    /// 某个句柄的结果已就绪
    ResultReady {
        handle: ResultHandle,
        status: ResultStatus,
    },
    /// 用户库存整体发生变化
    InventoryChanged,
    /// 物品定义目录发生变化
    CatalogChanged,
}

impl GatewayEvent {
    pub fn kind(&self) -> GatewayEventKind {
        match self {
            GatewayEvent::ResultReady { .. } => GatewayEventKind::ResultReady,
            GatewayEvent::InventoryChanged => GatewayEventKind::InventoryChanged,
            GatewayEvent::CatalogChanged => GatewayEventKind::CatalogChanged,
        }
    }

    pub fn event_type(&self) -> &'static str {
        self.kind().as_str()
    }

    /// 结果就绪通知携带的句柄
    pub fn handle(&self) -> Option<ResultHandle> {
        match self {
            GatewayEvent::ResultReady { handle, .. } => Some(*handle),
            _ => None,
        }
    }
}
