//! 模拟库存服务

use std::collections::{BTreeMap, HashMap, VecDeque};

use inv_config::GatewayConfig;
use inv_domain_core::{ItemDefId, ItemInstanceId, ItemRecord};
use inv_ports::{GatewayEvent, InventoryGateway, ResultHandle, ResultStatus, fits_in_buffer};
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::inventory::{Inventory, StoredItem};

/// 一个已发放句柄的服务端状态
#[derive(Debug)]
struct PendingResult {
    items: Vec<StoredItem>,
    status: ResultStatus,
    /// 完成时报告的状态
    final_status: ResultStatus,
    remaining_pumps: u32,
    /// 已投递过就绪通知；与 `status` 分开记录，最终状态本身可能就是 `Pending`
    settled: bool,
}

#[derive(Debug)]
struct ServiceState {
    inventory: Inventory,
    allow_item_queries: bool,
    completion_delay_pumps: u32,
    next_handle: i32,
    results: HashMap<ResultHandle, PendingResult>,
    queued_events: VecDeque<GatewayEvent>,
    fail_next_with: Option<ResultStatus>,
}

/// 模拟库存服务
///
/// 请求立即返回句柄；之后每次 [`InventoryGateway::run_callbacks`] 推进一步，
/// 经过 `completion_delay_pumps` 次 pump 后结果就绪并投递通知。
#[derive(Debug)]
pub struct SimulatedInventoryService {
    state: Mutex<ServiceState>,
}

impl Default for SimulatedInventoryService {
    fn default() -> Self {
        Self::new(Inventory::new())
    }
}

impl SimulatedInventoryService {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            state: Mutex::new(ServiceState {
                inventory,
                allow_item_queries: true,
                completion_delay_pumps: 1,
                next_handle: 1,
                results: HashMap::new(),
                queued_events: VecDeque::new(),
                fail_next_with: None,
            }),
        }
    }

    /// 从网关配置创建
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(Inventory::from_config(config))
            .with_item_queries_allowed(config.allow_item_queries)
            .with_completion_delay(config.completion_delay_pumps)
    }

    /// 设置请求完成所需的 pump 次数，0 表示下一次 pump 即完成
    pub fn with_completion_delay(mut self, pumps: u32) -> Self {
        self.state.get_mut().completion_delay_pumps = pumps;
        self
    }

    /// 为 false 时模拟不允许物品查询的执行上下文
    pub fn with_item_queries_allowed(mut self, allowed: bool) -> Self {
        self.state.get_mut().allow_item_queries = allowed;
        self
    }

    /// 让下一个请求以给定状态完成
    pub fn fail_next_result(&self, status: ResultStatus) {
        self.state.lock().fail_next_with = Some(status);
    }

    /// 向库存发放一个物品，并在下一次 pump 时投递 `InventoryChanged`
    pub fn grant_item(&self, item: StoredItem) {
        let mut state = self.state.lock();
        state.inventory.add_item(item);
        state.queued_events.push_back(GatewayEvent::InventoryChanged);
    }

    /// 更新物品定义，并在下一次 pump 时投递 `CatalogChanged`
    pub fn update_definition(&self, definition: ItemDefId, properties: BTreeMap<String, String>) {
        let mut state = self.state.lock();
        state.inventory.set_definition(definition, properties);
        state.queued_events.push_back(GatewayEvent::CatalogChanged);
    }

    /// 直接投递一条通知（例如不属于当前客户端的句柄）
    pub fn inject_event(&self, event: GatewayEvent) {
        self.state.lock().queued_events.push_back(event);
    }

    /// 尚未释放的句柄数
    pub fn live_handles(&self) -> usize {
        self.state.lock().results.len()
    }

    fn issue(&self, items: Vec<StoredItem>) -> Option<ResultHandle> {
        let mut state = self.state.lock();
        if !state.allow_item_queries {
            debug!("Item query refused in this execution context");
            return None;
        }

        let handle = ResultHandle::from_raw(state.next_handle);
        state.next_handle += 1;
        let final_status = state.fail_next_with.take().unwrap_or(ResultStatus::Ok);
        let remaining_pumps = state.completion_delay_pumps;
        state.results.insert(
            handle,
            PendingResult {
                items,
                status: ResultStatus::Pending,
                final_status,
                remaining_pumps,
                settled: false,
            },
        );

        debug!(handle = %handle, remaining_pumps, "Result handle issued");
        Some(handle)
    }
}

impl InventoryGateway for SimulatedInventoryService {
    fn request_all_items(&self) -> Option<ResultHandle> {
        let items = self.state.lock().inventory.items().to_vec();
        self.issue(items)
    }

    fn request_items_by_id(&self, ids: &[ItemInstanceId]) -> Option<ResultHandle> {
        let items = self.state.lock().inventory.select(ids);
        self.issue(items)
    }

    fn result_status(&self, handle: ResultHandle) -> ResultStatus {
        self.state
            .lock()
            .results
            .get(&handle)
            .map(|result| result.status)
            .unwrap_or(ResultStatus::InvalidParam)
    }

    fn result_items(
        &self,
        handle: ResultHandle,
        buffer: Option<&mut [ItemRecord]>,
    ) -> Option<usize> {
        let state = self.state.lock();
        let result = state.results.get(&handle)?;
        if !result.status.is_ok() {
            return None;
        }

        if let Some(buffer) = buffer {
            for (slot, item) in buffer.iter_mut().zip(&result.items) {
                *slot = item.record;
            }
        }
        Some(result.items.len())
    }

    fn result_item_property(
        &self,
        handle: ResultHandle,
        index: u32,
        key: Option<&str>,
        capacity: usize,
    ) -> Option<String> {
        let state = self.state.lock();
        let result = state.results.get(&handle)?;
        let item = result.items.get(index as usize)?;

        let value = match key.filter(|k| !k.is_empty()) {
            None => item.property_keys().join(","),
            Some(key) => item.property(key)?,
        };
        fits_in_buffer(&value, capacity).then_some(value)
    }

    fn item_definition_property(
        &self,
        definition: ItemDefId,
        key: Option<&str>,
        capacity: usize,
    ) -> Option<String> {
        let state = self.state.lock();
        let value = match key.filter(|k| !k.is_empty()) {
            None => state.inventory.definition_catalog(definition)?,
            Some(key) => state.inventory.definition_property(definition, key)?,
        };
        fits_in_buffer(&value, capacity).then_some(value)
    }

    fn release_result(&self, handle: ResultHandle) {
        if self.state.lock().results.remove(&handle).is_some() {
            debug!(handle = %handle, "Result handle destroyed");
        }
    }

    fn run_callbacks(&self) -> Vec<GatewayEvent> {
        let mut state = self.state.lock();
        let mut events: Vec<GatewayEvent> = state.queued_events.drain(..).collect();

        let mut ready: Vec<(ResultHandle, ResultStatus)> = Vec::new();
        for (handle, result) in state.results.iter_mut() {
            if result.settled {
                continue;
            }
            if result.remaining_pumps > 0 {
                result.remaining_pumps -= 1;
                continue;
            }
            result.status = result.final_status;
            result.settled = true;
            ready.push((*handle, result.status));
        }
        ready.sort_by_key(|(handle, _)| handle.raw());

        events.extend(
            ready
                .into_iter()
                .map(|(handle, status)| GatewayEvent::ResultReady { handle, status }),
        );
        if !events.is_empty() {
            trace!(count = events.len(), "Callbacks ready");
        }
        events
    }
}
