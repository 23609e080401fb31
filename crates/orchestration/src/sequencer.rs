//! 请求序列器
//!
//! 同一时刻至多持有一个句柄，句柄完成后运行预先登记的后续步骤

use std::fmt;
use std::sync::Arc;

use inv_domain_core::{ItemDefId, ItemInstanceId, ItemRecord};
use inv_errors::{AppError, AppResult};
use inv_ports::{InventoryGateway, ResultHandle};
use inv_telemetry::names;
use tracing::{debug, info, warn};

use crate::extraction::{PropertyEntry, PropertyReader, fetch_two_phase};

/// 句柄成功完成后要运行的后续步骤
pub type Continuation<H> = Box<dyn FnOnce(&mut H) -> AppResult<()>>;

/// 请求类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    AllItems,
    ByIds { count: usize },
}

impl RequestKind {
    fn label(&self) -> &'static str {
        match self {
            RequestKind::AllItems => "all_items",
            RequestKind::ByIds { .. } => "by_ids",
        }
    }
}

/// 按句柄登记的订阅
struct Subscription<H> {
    handle: ResultHandle,
    kind: RequestKind,
    continuation: Option<Continuation<H>>,
}

/// 通知与当前句柄的匹配结果
pub enum HandleMatch<H> {
    /// 句柄匹配，取出的后续步骤交给调用方运行
    Run(Continuation<H>),
    /// 句柄匹配，但后续步骤已被取走
    AlreadyTaken,
    /// 句柄不匹配
    Mismatch { owned: Option<ResultHandle> },
}

/// 请求序列器
///
/// 状态机 `Idle -> Owned(handle) -> Idle`：只有 `begin_*` 能进入 `Owned`，
/// 只有 [`OperationSequencer::complete_and_release`] 或 [`OperationSequencer::release`] 能回到 `Idle`。
/// 失败路径不会自动释放句柄。
pub struct OperationSequencer<H> {
    gateway: Arc<dyn InventoryGateway>,
    properties: PropertyReader,
    subscription: Option<Subscription<H>>,
}

impl<H> OperationSequencer<H> {
    pub fn new(gateway: Arc<dyn InventoryGateway>) -> Self {
        Self {
            gateway,
            properties: PropertyReader::default(),
            subscription: None,
        }
    }

    /// 设置属性读取器
    pub fn with_property_reader(mut self, properties: PropertyReader) -> Self {
        self.properties = properties;
        self
    }

    pub fn gateway(&self) -> &Arc<dyn InventoryGateway> {
        &self.gateway
    }

    pub fn is_idle(&self) -> bool {
        self.subscription.is_none()
    }

    /// 当前持有的句柄
    pub fn owned_handle(&self) -> Option<ResultHandle> {
        self.subscription.as_ref().map(|s| s.handle)
    }

    /// 当前持有的请求类型
    pub fn owned_kind(&self) -> Option<RequestKind> {
        self.subscription.as_ref().map(|s| s.kind)
    }

    pub fn has_pending_continuation(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|s| s.continuation.is_some())
    }

    fn ensure_idle(&self) -> AppResult<()> {
        match &self.subscription {
            Some(s) => Err(AppError::precondition(format!(
                "There is already an ongoing operation (handle {}).",
                s.handle
            ))),
            None => Ok(()),
        }
    }

    fn owned(&self) -> AppResult<ResultHandle> {
        self.owned_handle()
            .ok_or_else(|| AppError::precondition("There is no current operation ongoing."))
    }

    fn subscribe(&mut self, handle: ResultHandle, kind: RequestKind, continuation: Continuation<H>) {
        metrics::counter!(names::REQUESTS_ISSUED, "kind" => kind.label()).increment(1);
        info!(handle = %handle, kind = kind.label(), "Request issued");
        self.subscription = Some(Subscription {
            handle,
            kind,
            continuation: Some(continuation),
        });
    }

    fn rejected(kind: RequestKind, what: &str) -> AppError {
        metrics::counter!(names::REQUESTS_REJECTED, "kind" => kind.label()).increment(1);
        warn!(kind = kind.label(), "Gateway refused to issue a handle");
        AppError::gateway_rejected(format!(
            "Failed to get {}. The current execution context does not allow item queries.",
            what
        ))
    }

    /// 请求全部物品
    pub fn begin_all_items_query(&mut self, continuation: Continuation<H>) -> AppResult<ResultHandle> {
        self.ensure_idle()?;

        let kind = RequestKind::AllItems;
        let handle = self
            .gateway
            .request_all_items()
            .ok_or_else(|| Self::rejected(kind, "all items"))?;

        self.subscribe(handle, kind, continuation);
        Ok(handle)
    }

    /// 按实例 ID 请求物品
    pub fn begin_query_by_ids(
        &mut self,
        ids: &[ItemInstanceId],
        continuation: Continuation<H>,
    ) -> AppResult<ResultHandle> {
        self.ensure_idle()?;
        if ids.is_empty() {
            return Err(AppError::precondition(
                "At least one instance id is required.",
            ));
        }

        let kind = RequestKind::ByIds { count: ids.len() };
        let handle = self
            .gateway
            .request_items_by_id(ids)
            .ok_or_else(|| Self::rejected(kind, "items by ID"))?;

        self.subscribe(handle, kind, continuation);
        Ok(handle)
    }

    /// 校验当前句柄状态为成功
    ///
    /// 只应在收到完成通知之后调用，不能用于轮询
    pub fn check_status(&self) -> AppResult<()> {
        let handle = self.owned()?;
        let status = self.gateway.result_status(handle);
        if !status.is_ok() {
            warn!(handle = %handle, status = %status, "Result did not complete successfully");
            return Err(AppError::operation_failed(status));
        }
        Ok(())
    }

    /// 读取当前句柄的全部物品，保留句柄以便继续读取属性
    pub fn fetch_records(&self) -> AppResult<Vec<ItemRecord>> {
        self.check_status()?;
        let handle = self.owned()?;
        let gateway = &self.gateway;

        let records = fetch_two_phase(|buffer| gateway.result_items(handle, buffer))?;
        debug!(handle = %handle, count = records.len(), "Records fetched");
        Ok(records)
    }

    /// 读取全部物品并释放句柄
    pub fn complete_and_release(&mut self) -> AppResult<Vec<ItemRecord>> {
        let records = self.fetch_records()?;
        self.release()?;
        Ok(records)
    }

    /// 显式释放当前句柄，回到空闲状态
    pub fn release(&mut self) -> AppResult<()> {
        let handle = self.owned()?;
        self.gateway.release_result(handle);
        self.subscription = None;

        metrics::counter!(names::HANDLES_RELEASED).increment(1);
        debug!(handle = %handle, "Handle released");
        Ok(())
    }

    /// 读取当前结果中第 `index` 条物品的属性，`key` 为 `None` 时返回属性目录
    pub fn record_property(&self, index: u32, key: Option<&str>) -> AppResult<Option<String>> {
        let handle = self.owned()?;
        Ok(self
            .properties
            .record_property(self.gateway.as_ref(), handle, index, key))
    }

    /// 枚举当前结果中第 `index` 条物品的全部属性
    pub fn record_properties(&self, index: u32) -> AppResult<Vec<PropertyEntry>> {
        let handle = self.owned()?;
        Ok(self
            .properties
            .record_properties(self.gateway.as_ref(), handle, index))
    }

    /// 读取物品定义的属性，与当前句柄无关
    pub fn definition_property(&self, definition: ItemDefId, key: Option<&str>) -> Option<String> {
        self.properties
            .definition_property(self.gateway.as_ref(), definition, key)
    }

    /// 枚举物品定义的全部属性
    pub fn definition_properties(&self, definition: ItemDefId) -> Vec<PropertyEntry> {
        self.properties
            .definition_properties(self.gateway.as_ref(), definition)
    }

    /// 将通知中的句柄与当前句柄比对，匹配时取出后续步骤
    ///
    /// 后续步骤先被清空再交出，重入的通知不会再次触发它
    pub fn take_continuation_for(&mut self, handle: ResultHandle) -> HandleMatch<H> {
        match self.subscription.as_mut() {
            Some(s) if s.handle == handle => match s.continuation.take() {
                Some(continuation) => HandleMatch::Run(continuation),
                None => HandleMatch::AlreadyTaken,
            },
            other => HandleMatch::Mismatch {
                owned: other.map(|s| s.handle),
            },
        }
    }
}

impl<H> fmt::Debug for OperationSequencer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationSequencer")
            .field("owned_handle", &self.owned_handle())
            .field("owned_kind", &self.owned_kind())
            .field("pending_continuation", &self.has_pending_continuation())
            .finish()
    }
}
