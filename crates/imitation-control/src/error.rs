//! 控制层错误类型定义
//!
//! 所有错误都是引擎边界上的前置条件违反：不会在内部重试或恢复，
//! 直接返回给调用方处理。限幅（Clamping）不是错误，不会出现在这里。

use thiserror::Error;

/// 控制层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    /// 关节索引越界
    #[error("Joint index {index} out of range (total joints: {len})")]
    IndexOutOfRange {
        /// 请求的索引
        index: usize,
        /// 关节总数
        len: usize,
    },

    /// 关节名称不存在
    #[error("Joint '{name}' not found")]
    JointNotFound {
        /// 请求的关节名称
        name: String,
    },

    /// 输入/输出数组长度与关节总数不一致
    #[error("Size mismatch for {what}: expected {expected}, got {actual}")]
    SizeMismatch {
        /// 出错的数组
        what: &'static str,
        /// 期望长度
        expected: usize,
        /// 实际长度
        actual: usize,
    },

    /// 构造时检测到的无效配置（dt ≤ 0、加速度上下限颠倒等）
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// 期望位置或观测位置不是有限值（NaN 或无穷大）
    #[error("Non-finite {what} for joint {index}: {value}")]
    NonFinite {
        /// 出错的数组
        what: &'static str,
        /// 关节索引
        index: usize,
        /// 实际值
        value: f64,
    },

    /// 状态源无法提供某个关节的当前位置
    #[error("Joint state unavailable for '{joint}'")]
    StateUnavailable {
        /// 关节名称
        joint: String,
    },
}

impl ControlError {
    /// 是否为构造期配置错误
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, ControlError::InvalidConfiguration(_))
    }

    /// 是否为数组长度不匹配
    pub fn is_size_mismatch(&self) -> bool {
        matches!(self, ControlError::SizeMismatch { .. })
    }

    /// 是否为非有限输入
    pub fn is_non_finite(&self) -> bool {
        matches!(self, ControlError::NonFinite { .. })
    }

    pub(crate) fn size_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        ControlError::SizeMismatch {
            what,
            expected,
            actual,
        }
    }
}

/// 控制层 Result 类型别名
pub type Result<T> = std::result::Result<T, ControlError>;
