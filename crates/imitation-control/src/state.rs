//! 控制状态
//!
//! 当前/上一次/期望位置，以及当前/上一次误差。所有向量长度恒等于关节总数，
//! 索引与 [`JointIndexMap`](crate::JointIndexMap) 一致。
//!
//! 只有 [`PdControlEngine`](crate::PdControlEngine) 会修改它，每个控制周期一次。

use crate::vector::JointVector;

/// 控制状态
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlState {
    pub(crate) current_position: JointVector,
    pub(crate) previous_position: JointVector,
    pub(crate) desired_position: JointVector,
    pub(crate) error: JointVector,
    pub(crate) previous_error: JointVector,
}

impl ControlState {
    /// 创建全零状态
    pub fn zeroed(total_joints: usize) -> Self {
        ControlState {
            current_position: JointVector::zeros(total_joints),
            previous_position: JointVector::zeros(total_joints),
            desired_position: JointVector::zeros(total_joints),
            error: JointVector::zeros(total_joints),
            previous_error: JointVector::zeros(total_joints),
        }
    }

    /// 关节总数
    pub fn len(&self) -> usize {
        self.current_position.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.current_position.is_empty()
    }

    /// 当前位置
    pub fn current_position(&self) -> &[f64] {
        self.current_position.as_slice()
    }

    /// 上一周期位置
    pub fn previous_position(&self) -> &[f64] {
        self.previous_position.as_slice()
    }

    /// 期望位置
    pub fn desired_position(&self) -> &[f64] {
        self.desired_position.as_slice()
    }

    /// 当前误差
    pub fn error(&self) -> &[f64] {
        self.error.as_slice()
    }

    /// 上一周期误差
    pub fn previous_error(&self) -> &[f64] {
        self.previous_error.as_slice()
    }

    /// 历史前移：`previous ← current`
    pub(crate) fn shift_history(&mut self) {
        std::mem::swap(&mut self.previous_position, &mut self.current_position);
        std::mem::swap(&mut self.previous_error, &mut self.error);
    }

    /// 用观测位置播种，误差历史保持为零
    pub(crate) fn seed(&mut self, observed: &[f64]) {
        self.current_position.copy_from_slice(observed);
        self.previous_position.copy_from_slice(observed);
        self.error.fill_zero();
        self.previous_error.fill_zero();
    }

    /// 全部清零
    pub(crate) fn clear(&mut self) {
        self.current_position.fill_zero();
        self.previous_position.fill_zero();
        self.desired_position.fill_zero();
        self.error.fill_zero();
        self.previous_error.fill_zero();
    }

    /// 所有向量长度一致
    pub(crate) fn is_consistent(&self) -> bool {
        let n = self.len();
        self.previous_position.len() == n
            && self.desired_position.len() == n
            && self.error.len() == n
            && self.previous_error.len() == n
    }
}
