//! Inventory Gateway trait 定义

use inv_domain_core::{ItemDefId, ItemInstanceId, ItemRecord};

use crate::{GatewayEvent, ResultHandle, ResultStatus};

/// 外部库存服务
///
/// 请求立即返回句柄，结果在服务端异步计算，完成后通过 [`InventoryGateway::run_callbacks`]
/// 以 [`GatewayEvent::ResultReady`] 通知。所有方法都不阻塞。
pub trait InventoryGateway: Send + Sync {
    /// 请求当前用户的全部物品；执行上下文不允许时返回 `None`
    fn request_all_items(&self) -> Option<ResultHandle>;

    /// 按实例 ID 请求物品；执行上下文不允许时返回 `None`
    fn request_items_by_id(&self, ids: &[ItemInstanceId]) -> Option<ResultHandle>;

    /// 查询句柄状态，未知或已释放的句柄报告 [`ResultStatus::InvalidParam`]
    fn result_status(&self, handle: ResultHandle) -> ResultStatus;

    /// 读取结果中的物品
    ///
    /// `buffer` 为 `None` 时只返回数量；否则最多写入 `buffer.len()` 条并返回结果实际持有的数量。
    /// 内部错误时返回 `None`。
    fn result_items(&self, handle: ResultHandle, buffer: Option<&mut [ItemRecord]>)
    -> Option<usize>;

    /// 读取结果中第 `index` 条物品的属性
    ///
    /// `key` 为 `None` 或空串时返回以逗号分隔的属性名目录。
    /// 属性不存在或值放不进 `capacity` 大小的缓冲区时返回 `None`。
    fn result_item_property(
        &self,
        handle: ResultHandle,
        index: u32,
        key: Option<&str>,
        capacity: usize,
    ) -> Option<String>;

    /// 读取物品定义的属性，规则同 [`InventoryGateway::result_item_property`]
    fn item_definition_property(
        &self,
        definition: ItemDefId,
        key: Option<&str>,
        capacity: usize,
    ) -> Option<String>;

    /// 释放句柄，对已释放的句柄是幂等空操作
    fn release_result(&self, handle: ResultHandle);

    /// 回调泵：取出所有已就绪的通知
    fn run_callbacks(&self) -> Vec<GatewayEvent>;
}

/// 值（UTF-16 code unit 计，含结尾 NUL）是否放得进给定容量的缓冲区
pub fn fits_in_buffer(value: &str, capacity: usize) -> bool {
    value.encode_utf16().count() < capacity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_in_buffer_reserves_terminator() {
        assert!(fits_in_buffer("abc", 4));
        assert!(!fits_in_buffer("abcd", 4));
        assert!(fits_in_buffer("", 1));
        assert!(!fits_in_buffer("", 0));
    }
}
