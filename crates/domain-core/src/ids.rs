//! 强类型 ID 定义

use derive_more::{Display, From};
use std::str::FromStr;

/// 物品实例 ID（每个拥有的物品实例唯一）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display("{_0}")]
pub struct ItemInstanceId(pub u64);

impl ItemInstanceId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl FromStr for ItemInstanceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// 物品定义编号（引用物品类型，不唯一）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display("{_0}")]
pub struct ItemDefId(pub i32);

impl ItemDefId {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl FromStr for ItemDefId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_id_parse_and_display() {
        let id: ItemInstanceId = " 1234567890123 ".parse().unwrap();
        assert_eq!(id, ItemInstanceId(1234567890123));
        assert_eq!(id.to_string(), "1234567890123");
        assert!("abc".parse::<ItemInstanceId>().is_err());
    }

    #[test]
    fn test_def_id_from() {
        let def = ItemDefId::from(42);
        assert_eq!(def.value(), 42);
        assert_eq!(format!("{}", def), "42");
    }
}
