//! inv-errors - 统一错误处理
//!
//! 请求/句柄/回调协议中的错误分类，以及进程退出码映射

use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 调用方在错误的状态下调用了操作（编程错误，不重试）
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    /// 网关拒绝发放句柄
    #[error("Gateway rejected request: {0}")]
    GatewayRejected(String),

    /// 句柄以非成功状态完成
    #[error("Result status is not OK. It is {status}.")]
    OperationFailed { status: String },

    /// 两阶段 count/fetch 协议观察到不一致
    #[error("Gateway inconsistency: {0}")]
    GatewayInconsistency(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// 失败类别，决定进程退出码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// 启动阶段失败（配置、网关初始化）
    Initialization,
    /// 运行阶段失败
    Runtime,
}

impl FailureClass {
    /// 进程退出码
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Initialization => 1,
            Self::Runtime => 2,
        }
    }
}

impl AppError {
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::PreconditionViolation(msg.into())
    }

    pub fn gateway_rejected(msg: impl Into<String>) -> Self {
        Self::GatewayRejected(msg.into())
    }

    pub fn operation_failed(status: impl ToString) -> Self {
        Self::OperationFailed {
            status: status.to_string(),
        }
    }

    pub fn inconsistency(msg: impl Into<String>) -> Self {
        Self::GatewayInconsistency(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn initialization(msg: impl Into<String>) -> Self {
        Self::Initialization(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 错误所属的失败类别
    pub fn failure_class(&self) -> FailureClass {
        match self {
            Self::Config(_) | Self::Initialization(_) => FailureClass::Initialization,
            _ => FailureClass::Runtime,
        }
    }

    /// 转换为进程退出码
    pub fn exit_code(&self) -> u8 {
        self.failure_class().exit_code()
    }

    /// 是否为协议层的硬失败（调用方不应自动重试）
    pub fn is_protocol_failure(&self) -> bool {
        matches!(
            self,
            Self::PreconditionViolation(_)
                | Self::GatewayRejected(_)
                | Self::OperationFailed { .. }
                | Self::GatewayInconsistency(_)
        )
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
