//! 测试辅助：内存版机器人描述与关节状态源

#![allow(dead_code)]

use imitation_control::{
    AccelLimit, ControlError, DefaultGains, JointStateSource, RobotDescription, SegmentSizes,
};
use std::cell::RefCell;
use std::collections::HashMap;

/// 可配置的机器人描述
#[derive(Debug, Clone)]
pub struct FakeRobot {
    pub names: Vec<String>,
    pub sizes: SegmentSizes,
    pub limits: Vec<AccelLimit>,
    pub gains: Option<DefaultGains>,
}

impl FakeRobot {
    /// 每个分段一个关节
    pub fn three_joints() -> Self {
        Self::upper_body(1, 1, 1)
    }

    /// 指定分段大小，关节名称自动生成，不限幅
    pub fn upper_body(chest: usize, left_arm: usize, right_arm: usize) -> Self {
        let mut names = Vec::new();
        names.extend((0..chest).map(|i| format!("chest_{}", i)));
        names.extend((0..left_arm).map(|i| format!("left_arm_{}", i)));
        names.extend((0..right_arm).map(|i| format!("right_arm_{}", i)));
        let total = names.len();

        FakeRobot {
            names,
            sizes: SegmentSizes::new(chest, left_arm, right_arm),
            limits: vec![AccelLimit::unbounded(); total],
            gains: None,
        }
    }

    pub fn with_limits(mut self, limit: AccelLimit) -> Self {
        self.limits = vec![limit; self.names.len()];
        self
    }

    pub fn with_gains(mut self, kp: f64, kd: f64) -> Self {
        let total = self.names.len();
        self.gains = Some(DefaultGains {
            kp: vec![kp; total],
            kd: vec![kd; total],
        });
        self
    }
}

impl RobotDescription for FakeRobot {
    fn joint_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn segment_sizes(&self) -> SegmentSizes {
        self.sizes
    }

    fn acceleration_limits(&self) -> Vec<AccelLimit> {
        self.limits.clone()
    }

    fn default_gains(&self) -> DefaultGains {
        match &self.gains {
            Some(gains) => gains.clone(),
            None => DefaultGains::compiled(self.sizes),
        }
    }
}

/// 内存关节状态源，测试中可随时修改
#[derive(Debug, Default)]
pub struct FakeState {
    positions: RefCell<HashMap<String, f64>>,
}

impl FakeState {
    /// 所有关节位于 0
    pub fn zeros(robot: &FakeRobot) -> Self {
        let state = FakeState::default();
        for name in &robot.names {
            state.set(name, 0.0);
        }
        state
    }

    pub fn set(&self, name: &str, value: f64) {
        self.positions.borrow_mut().insert(name.to_string(), value);
    }

    pub fn set_all(&self, robot: &FakeRobot, values: &[f64]) {
        for (name, value) in robot.names.iter().zip(values) {
            self.set(name, *value);
        }
    }
}

impl JointStateSource for FakeState {
    fn joint_position(&self, name: &str) -> Result<f64, ControlError> {
        self.positions
            .borrow()
            .get(name)
            .copied()
            .ok_or_else(|| ControlError::StateUnavailable {
                joint: name.to_string(),
            })
    }
}
