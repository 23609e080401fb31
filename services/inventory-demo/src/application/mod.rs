//! 应用层

mod demo;
mod runner;

pub use demo::*;
pub use runner::*;
