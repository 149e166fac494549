//! 外部协作者接口
//!
//! 控制引擎不持有任何全局单例，所需的外部信息通过两个 trait 显式注入：
//!
//! - [`RobotDescription`]：构造期一次性查询（关节名称、分段大小、默认增益、加速度上下限）
//! - [`JointStateSource`]：每个控制周期查询一次当前关节位置
//!
//! 测试中可以用一个简单的内存实现替代真实机器人。

use crate::error::{ControlError, Result};
use crate::gains::DefaultGains;
use crate::joint::SegmentSizes;
use crate::limiter::AccelLimit;

/// 机器人描述（构造期协作者）
pub trait RobotDescription {
    /// 有序关节名称：胸部、左臂、右臂依次排列
    fn joint_names(&self) -> Vec<String>;

    /// 每个分段的关节数量
    fn segment_sizes(&self) -> SegmentSizes;

    /// 每个关节的加速度上下限（关节索引顺序）
    fn acceleration_limits(&self) -> Vec<AccelLimit>;

    /// 每个关节的默认增益
    ///
    /// 默认使用内置的按分段增益表。
    fn default_gains(&self) -> DefaultGains {
        DefaultGains::compiled(self.segment_sizes())
    }
}

/// 关节状态源（每周期协作者）
///
/// 查询必须是快速、非阻塞的；引擎本身不做任何超时处理。
pub trait JointStateSource {
    /// 按名称查询关节当前位置
    ///
    /// 无法提供时返回 `StateUnavailable`。
    fn joint_position(&self, name: &str) -> Result<f64>;

    /// 按关节索引顺序读取全部位置
    fn read_positions(&self, names: &[String], out: &mut [f64]) -> Result<()> {
        if names.len() != out.len() {
            return Err(ControlError::size_mismatch("joint positions", names.len(), out.len()));
        }
        for (slot, name) in out.iter_mut().zip(names.iter()) {
            *slot = self.joint_position(name)?;
        }
        Ok(())
    }
}

impl<T: RobotDescription + ?Sized> RobotDescription for &T {
    fn joint_names(&self) -> Vec<String> {
        (**self).joint_names()
    }

    fn segment_sizes(&self) -> SegmentSizes {
        (**self).segment_sizes()
    }

    fn acceleration_limits(&self) -> Vec<AccelLimit> {
        (**self).acceleration_limits()
    }

    fn default_gains(&self) -> DefaultGains {
        (**self).default_gains()
    }
}

impl<T: JointStateSource + ?Sized> JointStateSource for &T {
    fn joint_position(&self, name: &str) -> Result<f64> {
        (**self).joint_position(name)
    }

    fn read_positions(&self, names: &[String], out: &mut [f64]) -> Result<()> {
        (**self).read_positions(names, out)
    }
}

impl<T: JointStateSource + ?Sized> JointStateSource for Box<T> {
    fn joint_position(&self, name: &str) -> Result<f64> {
        (**self).joint_position(name)
    }

    fn read_positions(&self, names: &[String], out: &mut [f64]) -> Result<()> {
        (**self).read_positions(names, out)
    }
}
