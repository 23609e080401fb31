//! ports - 抽象 trait 层
//!
//! 定义外部库存服务（网关）的抽象接口与协议类型

mod event;
mod gateway;
mod handle;
mod status;

pub use event::*;
pub use gateway::*;
pub use handle::*;
pub use status::*;
