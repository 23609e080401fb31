//! 记录与属性提取

use std::fmt;

use inv_domain_core::{DEFAULT_CATALOG_DELIMITER, ItemDefId, render_property, split_catalog};
use inv_errors::{AppError, AppResult};
use inv_ports::{InventoryGateway, ResultHandle};
use tracing::warn;

/// 属性值缓冲区的默认容量（UTF-16 code unit）
pub const DEFAULT_PROPERTY_CAPACITY: usize = 4096;

/// 两阶段读取：先不带缓冲区取数量，再按数量分配缓冲区取数据
///
/// `fetch` 返回结果实际持有的数量，`None` 表示网关内部错误。两次数量不一致时返回
/// [`AppError::GatewayInconsistency`]，不截断也不重试。
pub fn fetch_two_phase<T, F>(mut fetch: F) -> AppResult<Vec<T>>
where
    T: Default + Clone,
    F: FnMut(Option<&mut [T]>) -> Option<usize>,
{
    let expected = fetch(None).ok_or_else(|| AppError::internal("Failed to get item count."))?;

    let mut buffer = vec![T::default(); expected];
    let actual = fetch(Some(&mut buffer)).ok_or_else(|| AppError::internal("Failed to get items."))?;

    if actual != expected {
        return Err(AppError::inconsistency(format!(
            "item count changed between count and fetch: {} then {}",
            expected, actual
        )));
    }
    Ok(buffer)
}

/// 一个属性及其值，`None` 表示取不到
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub key: String,
    pub value: Option<String>,
}

impl fmt::Display for PropertyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_property(&self.key, self.value.as_deref()))
    }
}

/// 属性读取器
///
/// 使用固定容量的缓冲区，超出容量的值视为缺失而不是截断
#[derive(Debug, Clone, Copy)]
pub struct PropertyReader {
    capacity: usize,
    delimiter: char,
}

impl Default for PropertyReader {
    fn default() -> Self {
        Self::new(DEFAULT_PROPERTY_CAPACITY, DEFAULT_CATALOG_DELIMITER)
    }
}

impl PropertyReader {
    pub fn new(capacity: usize, delimiter: char) -> Self {
        Self {
            capacity,
            delimiter,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record_property(
        &self,
        gateway: &dyn InventoryGateway,
        handle: ResultHandle,
        index: u32,
        key: Option<&str>,
    ) -> Option<String> {
        gateway.result_item_property(handle, index, key, self.capacity)
    }

    pub fn definition_property(
        &self,
        gateway: &dyn InventoryGateway,
        definition: ItemDefId,
        key: Option<&str>,
    ) -> Option<String> {
        gateway.item_definition_property(definition, key, self.capacity)
    }

    /// 先取属性目录，再逐个查询
    pub fn record_properties(
        &self,
        gateway: &dyn InventoryGateway,
        handle: ResultHandle,
        index: u32,
    ) -> Vec<PropertyEntry> {
        let catalog = self.record_property(gateway, handle, index, None);
        self.enumerate(catalog, |key| {
            self.record_property(gateway, handle, index, Some(key))
        })
    }

    /// 先取定义的属性目录，再逐个查询
    pub fn definition_properties(
        &self,
        gateway: &dyn InventoryGateway,
        definition: ItemDefId,
    ) -> Vec<PropertyEntry> {
        let catalog = self.definition_property(gateway, definition, None);
        self.enumerate(catalog, |key| {
            self.definition_property(gateway, definition, Some(key))
        })
    }

    fn enumerate<F>(&self, catalog: Option<String>, mut lookup: F) -> Vec<PropertyEntry>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let Some(catalog) = catalog else {
            warn!("Property catalog unavailable");
            return Vec::new();
        };

        split_catalog(&catalog, self.delimiter)
            .into_iter()
            .map(|key| PropertyEntry {
                key: key.to_string(),
                value: lookup(key),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_phase_returns_all_records() {
        let source = vec![7u32, 8, 9];
        let records = fetch_two_phase(|buffer: Option<&mut [u32]>| {
            if let Some(buffer) = buffer {
                let n = buffer.len().min(source.len());
                buffer[..n].copy_from_slice(&source[..n]);
            }
            Some(source.len())
        })
        .unwrap();
        assert_eq!(records, vec![7, 8, 9]);
    }

    #[test]
    fn test_two_phase_empty_result() {
        let records: Vec<u32> = fetch_two_phase(|_| Some(0)).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_two_phase_count_mismatch() {
        let mut calls = 0;
        let err = fetch_two_phase(|_: Option<&mut [u32]>| {
            calls += 1;
            Some(if calls == 1 { 0 } else { 2 })
        })
        .unwrap_err();
        assert!(matches!(err, AppError::GatewayInconsistency(_)));
    }

    #[test]
    fn test_two_phase_internal_error() {
        let err = fetch_two_phase::<u32, _>(|_| None).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_property_entry_display() {
        let present = PropertyEntry {
            key: "name".to_string(),
            value: Some("Hat".to_string()),
        };
        let absent = PropertyEntry {
            key: "tags".to_string(),
            value: None,
        };
        assert_eq!(present.to_string(), "name: Hat");
        assert_eq!(absent.to_string(), "Could not get value for \"tags\".");
    }
}
