//! 物品标志位

use std::fmt;

/// 物品标志位集合
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ItemFlags(u16);

impl ItemFlags {
    /// 不可交易
    pub const NO_TRADE: Self = Self(1 << 0);
    /// 已被移除（交易或销毁）
    pub const REMOVED: Self = Self(1 << 8);
    /// 已被消耗
    pub const CONSUMED: Self = Self(1 << 9);

    const NAMED: [(Self, &'static str); 3] = [
        (Self::NO_TRADE, "NoTrade"),
        (Self::REMOVED, "Removed"),
        (Self::CONSUMED, "Consumed"),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u16 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for ItemFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl From<u16> for ItemFlags {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}

/// 按名称输出，未知位以数值附在末尾；空集合输出 `0`
impl fmt::Display for ItemFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("0");
        }

        let mut remaining = self.0;
        let mut parts = Vec::new();
        for (flag, name) in Self::NAMED {
            if self.contains(flag) {
                parts.push(name.to_string());
                remaining &= !flag.0;
            }
        }
        if remaining != 0 {
            parts.push(format!("{:#06x}", remaining));
        }
        f.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(ItemFlags::empty().to_string(), "0");
        assert_eq!(ItemFlags::NO_TRADE.to_string(), "NoTrade");
        assert_eq!(
            (ItemFlags::REMOVED | ItemFlags::CONSUMED).to_string(),
            "Removed, Consumed"
        );
    }

    #[test]
    fn test_display_unknown_bits() {
        let flags = ItemFlags::from_bits(0b1 | 0b100);
        assert_eq!(flags.to_string(), "NoTrade, 0x0004");
        assert!(flags.contains(ItemFlags::NO_TRADE));
        assert!(!flags.contains(ItemFlags::REMOVED));
    }
}
