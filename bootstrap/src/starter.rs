//! 应用启动器
//!
//! 提供统一的启动模式

use std::process::ExitCode;
use std::time::Duration;

use inv_config::AppConfig;
use inv_errors::{AppError, AppResult};
use tracing::{debug, error, info};

use crate::pump::{PumpTarget, run_pump_loop};
use crate::runtime::init_runtime;
use crate::shutdown::ShutdownController;

/// 运行应用
///
/// 1. 加载配置
/// 2. 初始化运行时（日志、metrics）
/// 3. 调用闭包构建回调泵目标（闭包内可以发起第一个请求）
/// 4. 运行回调泵直到退出
///
/// 启动阶段失败返回退出码 1，运行阶段失败返回退出码 2
///
/// # 示例
///
/// ```ignore
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> ExitCode {
///     inv_bootstrap::run(&AppConfig::config_dir(), |config, shutdown| {
///         MyApp::start(config, shutdown)
///     })
///     .await
/// }
/// ```
pub async fn run<F, T>(config_dir: &str, build: F) -> ExitCode
where
    F: FnOnce(&AppConfig, ShutdownController) -> AppResult<T>,
    T: PumpTarget,
{
    // 1. 加载配置
    let config = match AppConfig::load(config_dir) {
        Ok(config) => config,
        Err(e) => return exit_with_message(AppError::config(e.to_string())),
    };

    // 2. 初始化运行时
    let metrics = init_runtime(&config);
    info!("Starting {}", config.app_name);

    // 3. 构建目标
    let shutdown = ShutdownController::new();
    let mut target = match build(&config, shutdown.clone()) {
        Ok(target) => target,
        Err(e) => return exit_with_message(e),
    };

    // 4. 运行回调泵
    let interval = Duration::from_millis(config.runtime.pump_interval_ms);
    let result = run_pump_loop(&mut target, interval, &shutdown).await;

    if let Some(handle) = metrics {
        debug!(snapshot = %handle.render(), "Metrics snapshot");
    }

    match result {
        Ok(_) => {
            info!("{} stopped", config.app_name);
            ExitCode::SUCCESS
        }
        Err(e) => exit_with_message(e),
    }
}

fn exit_with_message(err: AppError) -> ExitCode {
    error!(error = %err, exit_code = err.exit_code(), "Application failed");
    eprintln!("Something failed: {}", err);
    ExitCode::from(err.exit_code())
}
