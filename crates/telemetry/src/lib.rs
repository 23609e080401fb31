//! telemetry - 可观测性库

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 指标名称
pub mod names {
    pub const REQUESTS_ISSUED: &str = "inventory_requests_issued_total";
    pub const REQUESTS_REJECTED: &str = "inventory_requests_rejected_total";
    pub const NOTIFICATIONS_RECEIVED: &str = "inventory_notifications_received_total";
    pub const HANDLE_MISMATCHES: &str = "inventory_handle_mismatches_total";
    pub const CONTINUATIONS_RUN: &str = "inventory_continuations_run_total";
    pub const HANDLES_RELEASED: &str = "inventory_handles_released_total";
}

/// 初始化 tracing
///
/// 日志写到 stderr，stdout 留给控制台表格
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// 初始化 JSON 格式的 tracing（生产环境）
pub fn init_tracing_json(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();
}

/// 初始化 Prometheus metrics
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}
