//! 结果句柄

use derive_more::Display;

/// 一个异步查询的不透明句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct ResultHandle(i32);

impl ResultHandle {
    /// 无效句柄哨兵值
    pub const INVALID: Self = Self(-1);

    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> i32 {
        self.0
    }

    pub const fn is_valid(&self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl Default for ResultHandle {
    fn default() -> Self {
        Self::INVALID
    }
}
