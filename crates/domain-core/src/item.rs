//! 物品记录

use crate::{ItemDefId, ItemFlags, ItemInstanceId};

/// 一条库存记录
///
/// 只由网关按句柄批量产出，产出后不可变
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ItemRecord {
    pub instance_id: ItemInstanceId,
    pub definition: ItemDefId,
    pub quantity: u16,
    pub flags: ItemFlags,
}

impl ItemRecord {
    pub fn new(
        instance_id: ItemInstanceId,
        definition: ItemDefId,
        quantity: u16,
        flags: ItemFlags,
    ) -> Self {
        Self {
            instance_id,
            definition,
            quantity,
            flags,
        }
    }
}
