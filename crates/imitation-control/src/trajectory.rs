//! 关节轨迹消息
//!
//! 与常见的 `JointTrajectory` 消息同构的纯数据结构：一组有序关节名称，
//! 加上若干轨迹点，每个点携带位置/速度/加速度/力矩数组和相对起始时间。
//!
//! 消息收发不在本 crate 范围内；引擎只读取点的 `positions`，
//! 并把钳位后的加速度写回同一个点的 `accelerations`。

use std::time::Duration;

/// 轨迹点
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JointTrajectoryPoint {
    /// 期望位置
    pub positions: Vec<f64>,
    /// 期望速度
    pub velocities: Vec<f64>,
    /// 加速度（由引擎填写）
    pub accelerations: Vec<f64>,
    /// 力矩
    pub effort: Vec<f64>,
    /// 相对轨迹起始的时间
    pub time_from_start: Duration,
}

impl JointTrajectoryPoint {
    /// 用期望位置创建轨迹点，加速度数组预留为同样长度的零
    pub fn with_positions(positions: Vec<f64>, time_from_start: Duration) -> Self {
        let accelerations = vec![0.0; positions.len()];
        JointTrajectoryPoint {
            positions,
            accelerations,
            time_from_start,
            ..Default::default()
        }
    }
}

/// 关节轨迹
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JointTrajectory {
    /// 有序关节名称（为空表示与控制器的关节顺序一致）
    pub joint_names: Vec<String>,
    /// 轨迹点
    pub points: Vec<JointTrajectoryPoint>,
}
