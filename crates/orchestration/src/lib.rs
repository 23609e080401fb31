//! inv-orchestration - 请求/句柄/回调编排
//!
//! - [`OperationSequencer`]：持有至多一个句柄与一个后续步骤
//! - [`NotificationDispatcher`]：把网关通知路由到序列器
//! - [`fetch_two_phase`] 与 [`PropertyReader`]：结果提取

mod dispatcher;
mod extraction;
mod sequencer;

pub use dispatcher::*;
pub use extraction::*;
pub use sequencer::*;
