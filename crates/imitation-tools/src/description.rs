//! # 机器人描述配置
//!
//! 从 TOML 文件加载关节布局、增益和加速度上下限，并实现
//! [`RobotDescription`]，可直接用于构造 [`PdControlEngine`]。
//!
//! ```toml
//! control_period = 0.01          # 或 control_rate_hz = 100.0（二选一）
//!
//! [[chest]]
//! name = "torsoYaw"
//! kp = 8.0                        # 可选，缺省使用内置默认值
//! kd = 1.2                        # 可选
//! min_accel = -5.0                # 可选，缺省不限
//! max_accel = 5.0                 # 可选，缺省不限
//!
//! [[left_arm]]
//! name = "leftShoulderPitch"
//! min_accel = -10.0
//! max_accel = 10.0
//!
//! [[right_arm]]
//! name = "rightShoulderPitch"
//! min_accel = -10.0
//! max_accel = 10.0
//! ```

use crate::error::{ConfigError, Result};
use imitation_control::{
    AccelLimit, DefaultGains, JointStateSource, PdControlEngine, RobotDescription, Segment,
    SegmentSizes,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 单个关节配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JointConfig {
    /// 关节名称
    pub name: String,

    /// 比例增益，缺省使用内置默认值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kp: Option<f64>,

    /// 微分增益，缺省使用内置默认值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kd: Option<f64>,

    /// 最小加速度，缺省不限
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_accel: Option<f64>,

    /// 最大加速度，缺省不限
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_accel: Option<f64>,
}

impl JointConfig {
    /// 使用对称加速度上下限创建关节配置
    pub fn symmetric(name: &str, accel_limit: f64) -> Self {
        JointConfig {
            name: name.to_string(),
            kp: None,
            kd: None,
            min_accel: Some(-accel_limit),
            max_accel: Some(accel_limit),
        }
    }

    fn limit(&self) -> AccelLimit {
        AccelLimit::new(
            self.min_accel.unwrap_or(f64::NEG_INFINITY),
            self.max_accel.unwrap_or(f64::INFINITY),
        )
    }
}

/// 机器人描述配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RobotConfig {
    /// 控制周期（秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_period: Option<f64>,

    /// 控制频率（Hz），`dt = 1 / rate`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_rate_hz: Option<f64>,

    /// 胸部关节
    #[serde(default)]
    pub chest: Vec<JointConfig>,

    /// 左臂关节
    #[serde(default)]
    pub left_arm: Vec<JointConfig>,

    /// 右臂关节
    #[serde(default)]
    pub right_arm: Vec<JointConfig>,
}

impl RobotConfig {
    /// 从 TOML 字符串解析
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RobotConfig = toml::from_str(content)?;
        config.control_period()?;
        Ok(config)
    }

    /// 从文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            "Loaded robot description from {} ({} joints)",
            path.display(),
            config.segment_sizes().total()
        );
        Ok(config)
    }

    /// 序列化为 TOML 字符串
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 保存到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        fs::write(path, content).map_err(|e| ConfigError::io(path, e))
    }

    /// 控制周期（秒）
    ///
    /// `control_period` 与 `control_rate_hz` 必须且只能给出一个。
    pub fn control_period(&self) -> Result<f64> {
        match (self.control_period, self.control_rate_hz) {
            (Some(dt), None) => Ok(dt),
            (None, Some(rate)) if rate > 0.0 => Ok(1.0 / rate),
            (None, Some(rate)) => Err(ConfigError::Invalid(format!(
                "control_rate_hz must be positive, got {}",
                rate
            ))),
            (Some(_), Some(_)) => Err(ConfigError::Invalid(
                "specify either control_period or control_rate_hz, not both".to_string(),
            )),
            (None, None) => Err(ConfigError::Invalid(
                "missing control_period (or control_rate_hz)".to_string(),
            )),
        }
    }

    /// 指定分段的关节配置
    pub fn segment(&self, segment: Segment) -> &[JointConfig] {
        match segment {
            Segment::Chest => &self.chest,
            Segment::LeftArm => &self.left_arm,
            Segment::RightArm => &self.right_arm,
        }
    }

    /// 按关节索引顺序遍历所有关节
    pub fn joints(&self) -> impl Iterator<Item = &JointConfig> {
        Segment::ALL.into_iter().flat_map(|segment| self.segment(segment).iter())
    }

    /// 用本配置和给定状态源构造控制引擎
    pub fn build_engine<S: JointStateSource>(&self, source: S) -> Result<PdControlEngine<S>> {
        let dt = self.control_period()?;
        Ok(PdControlEngine::new(self, source, dt)?)
    }

    /// 上半身示例配置（胸部 3 关节，双臂各 7 关节，100 Hz）
    pub fn example() -> Self {
        const CHEST: [&str; 3] = ["torsoYaw", "torsoPitch", "torsoRoll"];
        const ARM: [&str; 7] = [
            "ShoulderPitch",
            "ShoulderRoll",
            "ShoulderYaw",
            "ElbowPitch",
            "ForearmYaw",
            "WristRoll",
            "WristPitch",
        ];

        RobotConfig {
            control_period: None,
            control_rate_hz: Some(100.0),
            chest: CHEST.iter().map(|name| JointConfig::symmetric(name, 5.0)).collect(),
            left_arm: ARM
                .iter()
                .map(|joint| JointConfig::symmetric(&format!("left{}", joint), 10.0))
                .collect(),
            right_arm: ARM
                .iter()
                .map(|joint| JointConfig::symmetric(&format!("right{}", joint), 10.0))
                .collect(),
        }
    }
}

impl RobotDescription for RobotConfig {
    fn joint_names(&self) -> Vec<String> {
        self.joints().map(|joint| joint.name.clone()).collect()
    }

    fn segment_sizes(&self) -> SegmentSizes {
        SegmentSizes::new(self.chest.len(), self.left_arm.len(), self.right_arm.len())
    }

    fn acceleration_limits(&self) -> Vec<AccelLimit> {
        self.joints().map(JointConfig::limit).collect()
    }

    fn default_gains(&self) -> DefaultGains {
        let mut gains = DefaultGains::compiled(self.segment_sizes());
        for (index, joint) in self.joints().enumerate() {
            if let Some(kp) = joint.kp {
                gains.kp[index] = kp;
            }
            if let Some(kd) = joint.kd {
                gains.kd[index] = kd;
            }
        }
        gains
    }
}
