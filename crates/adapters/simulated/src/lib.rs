//! inv-adapter-simulated - 进程内模拟库存服务
//!
//! 请求在若干次 pump 之后完成，完成时投递 `ResultReady` 通知

mod inventory;
mod service;

pub use inventory::*;
pub use service::*;
