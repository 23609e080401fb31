//! 运行时

use inv_config::AppConfig;
use inv_telemetry::{init_metrics, init_tracing, init_tracing_json};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{info, warn};

/// 初始化运行时：tracing 以及可选的 metrics 记录器
pub fn init_runtime(config: &AppConfig) -> Option<PrometheusHandle> {
    // 初始化 tracing
    if config.is_production() {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }

    let metrics = if config.telemetry.metrics {
        match init_metrics() {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "Failed to install metrics recorder, continuing without it");
                None
            }
        }
    } else {
        None
    };

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        metrics = metrics.is_some(),
        "Runtime initialized"
    );
    metrics
}
