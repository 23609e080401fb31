//! 模拟库存数据

use std::collections::{BTreeMap, HashMap};

use inv_config::GatewayConfig;
use inv_domain_core::{ItemDefId, ItemFlags, ItemInstanceId, ItemRecord};

const BUILTIN_ITEM_KEYS: [&str; 4] = ["itemid", "itemdefid", "quantity", "flags"];

/// 物品实例及其自定义属性
#[derive(Debug, Clone)]
pub struct StoredItem {
    pub record: ItemRecord,
    pub properties: BTreeMap<String, String>,
}

impl StoredItem {
    pub fn new(record: ItemRecord) -> Self {
        Self {
            record,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// 内置属性在前，自定义属性按字典序在后
    pub fn property_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = BUILTIN_ITEM_KEYS.iter().map(|k| k.to_string()).collect();
        for key in self.properties.keys() {
            if !BUILTIN_ITEM_KEYS.contains(&key.as_str()) {
                keys.push(key.clone());
            }
        }
        keys
    }

    pub fn property(&self, key: &str) -> Option<String> {
        match key {
            "itemid" => Some(self.record.instance_id.to_string()),
            "itemdefid" => Some(self.record.definition.to_string()),
            "quantity" => Some(self.record.quantity.to_string()),
            "flags" => Some(self.record.flags.bits().to_string()),
            other => self.properties.get(other).cloned(),
        }
    }
}

/// 模拟服务端的库存与定义目录
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<StoredItem>,
    definitions: HashMap<ItemDefId, BTreeMap<String, String>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从配置中的种子数据构建
    pub fn from_config(config: &GatewayConfig) -> Self {
        let mut inventory = Self::new();
        for seed in &config.inventory {
            let record = ItemRecord::new(
                ItemInstanceId::new(seed.instance_id),
                ItemDefId::new(seed.definition),
                seed.quantity,
                ItemFlags::from_bits(seed.flags),
            );
            inventory.items.push(StoredItem {
                record,
                properties: seed.properties.clone(),
            });
        }
        for seed in &config.definitions {
            inventory
                .definitions
                .insert(ItemDefId::new(seed.id), seed.properties.clone());
        }
        inventory
    }

    pub fn add_item(&mut self, item: StoredItem) {
        self.items.push(item);
    }

    pub fn set_definition(&mut self, definition: ItemDefId, properties: BTreeMap<String, String>) {
        self.definitions.insert(definition, properties);
    }

    pub fn items(&self) -> &[StoredItem] {
        &self.items
    }

    /// 按实例 ID 选取，忽略不存在的 ID，重复 ID 只返回一次
    pub fn select(&self, ids: &[ItemInstanceId]) -> Vec<StoredItem> {
        self.items
            .iter()
            .filter(|item| ids.contains(&item.record.instance_id))
            .cloned()
            .collect()
    }

    pub fn definition_catalog(&self, definition: ItemDefId) -> Option<String> {
        let properties = self.definitions.get(&definition)?;
        let mut keys = vec!["itemdefid".to_string()];
        keys.extend(properties.keys().filter(|k| k.as_str() != "itemdefid").cloned());
        Some(keys.join(","))
    }

    pub fn definition_property(&self, definition: ItemDefId, key: &str) -> Option<String> {
        let properties = self.definitions.get(&definition)?;
        match key {
            "itemdefid" => Some(definition.to_string()),
            other => properties.get(other).cloned(),
        }
    }
}
