//! 结果状态

use std::fmt;

/// 网关报告的句柄状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultStatus {
    /// 成功
    Ok,
    /// 通用失败
    Fail,
    /// 参数无效（包括未知或已释放的句柄）
    InvalidParam,
    /// 服务不可用
    ServiceUnavailable,
    /// 仍在进行中
    Pending,
    /// 超出限制
    LimitExceeded,
    /// 结果已过期
    Expired,
    /// 其他错误码
    Other(i32),
}

impl ResultStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, ResultStatus::Ok)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ResultStatus::Pending)
    }
}

impl From<i32> for ResultStatus {
    fn from(value: i32) -> Self {
        match value {
            1 => ResultStatus::Ok,
            2 => ResultStatus::Fail,
            8 => ResultStatus::InvalidParam,
            20 => ResultStatus::ServiceUnavailable,
            22 => ResultStatus::Pending,
            25 => ResultStatus::LimitExceeded,
            27 => ResultStatus::Expired,
            other => ResultStatus::Other(other),
        }
    }
}

impl From<ResultStatus> for i32 {
    fn from(status: ResultStatus) -> Self {
        match status {
            ResultStatus::Ok => 1,
            ResultStatus::Fail => 2,
            ResultStatus::InvalidParam => 8,
            ResultStatus::ServiceUnavailable => 20,
            ResultStatus::Pending => 22,
            ResultStatus::LimitExceeded => 25,
            ResultStatus::Expired => 27,
            ResultStatus::Other(code) => code,
        }
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultStatus::Other(code) => write!(f, "Other({})", code),
            named => write!(f, "{:?}", named),
        }
    }
}
