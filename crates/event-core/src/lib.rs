//! inv-event-core - 事件核心库
//!
//! 网关通知的观察者 trait 与内置观察者

mod event_handler;
mod event_log;

pub use event_handler::*;
pub use event_log::*;
