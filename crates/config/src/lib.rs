//! inv-config - 配置加载库

use std::collections::BTreeMap;
use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "INVENTORY_";

/// 配置目录环境变量
pub const CONFIG_DIR_ENV: &str = "INVENTORY_CONFIG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// 遥测配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 是否安装 Prometheus 记录器
    #[serde(default)]
    pub metrics: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            metrics: false,
        }
    }
}

/// 回调泵配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// 两次 pump 之间的间隔
    #[serde(default = "default_pump_interval_ms")]
    pub pump_interval_ms: u64,
}

fn default_pump_interval_ms() -> u64 {
    16
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            pump_interval_ms: default_pump_interval_ms(),
        }
    }
}

/// 属性读取配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertiesConfig {
    /// 属性值缓冲区容量（UTF-16 code unit），超出部分视为缺失
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
    /// 属性目录分隔符
    #[serde(default = "default_catalog_delimiter")]
    pub catalog_delimiter: char,
}

fn default_buffer_capacity() -> usize {
    4096
}

fn default_catalog_delimiter() -> char {
    ','
}

impl Default for PropertiesConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
            catalog_delimiter: default_catalog_delimiter(),
        }
    }
}

/// 模拟库存中的一个物品实例
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedItem {
    pub instance_id: u64,
    pub definition: i32,
    #[serde(default = "default_quantity")]
    pub quantity: u16,
    #[serde(default)]
    pub flags: u16,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

fn default_quantity() -> u16 {
    1
}

/// 模拟目录中的一个物品定义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDefinition {
    pub id: i32,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// 网关（模拟库存服务）配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// 为 false 时模拟服务端执行上下文，所有物品查询都会被拒绝
    #[serde(default = "default_true")]
    pub allow_item_queries: bool,
    /// 请求在多少次 pump 之后完成
    #[serde(default = "default_completion_delay_pumps")]
    pub completion_delay_pumps: u32,
    #[serde(default)]
    pub inventory: Vec<SeedItem>,
    #[serde(default)]
    pub definitions: Vec<SeedDefinition>,
}

fn default_true() -> bool {
    true
}

fn default_completion_delay_pumps() -> u32 {
    2
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            allow_item_queries: true,
            completion_delay_pumps: default_completion_delay_pumps(),
            inventory: Vec::new(),
            definitions: Vec::new(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub properties: PropertiesConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "inventory-demo".to_string(),
            app_env: "development".to_string(),
            telemetry: TelemetryConfig::default(),
            runtime: RuntimeConfig::default(),
            properties: PropertiesConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 顺序：内置默认值、`default.toml`、`<APP_ENV>.toml`、`INVENTORY_` 前缀的环境变量
    pub fn load(config_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let dir = config_dir.as_ref();
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config: Self = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(dir.join("default.toml")))
            .merge(Toml::file(dir.join(format!("{}.toml", env))))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// 配置目录：`INVENTORY_CONFIG_DIR`，默认 `config`
    pub fn config_dir() -> String {
        std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| "config".to_string())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.properties.buffer_capacity == 0 {
            return Err(ConfigError::Invalid(
                "properties.buffer_capacity must be positive".to_string(),
            ));
        }
        if self.runtime.pump_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "runtime.pump_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}
