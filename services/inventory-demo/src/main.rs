//! inventory-demo - 库存请求/回调演示

use std::process::ExitCode;

use inv_config::AppConfig;
use inventory_demo::application::DemoRunner;
use inventory_demo::console::StdConsole;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    inv_bootstrap::run(&AppConfig::config_dir(), |config, shutdown| {
        DemoRunner::start(config, Box::new(StdConsole::new()), shutdown)
    })
    .await
}
