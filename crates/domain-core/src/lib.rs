//! inv-domain-core - 库存领域核心类型
//!
//! 物品 ID、物品标志、物品记录、属性目录

mod flags;
mod ids;
mod item;
mod property;

pub use flags::*;
pub use ids::*;
pub use item::*;
pub use property::*;
