//! inventory-demo - 库存请求/回调演示

pub mod application;
pub mod console;
pub mod driver;
