//! inv-bootstrap - 统一启动骨架
//!
//! 配置加载、运行时初始化、回调泵循环与退出控制

mod pump;
mod runtime;
mod shutdown;
mod starter;

pub use pump::*;
pub use runtime::*;
pub use shutdown::*;
pub use starter::*;
