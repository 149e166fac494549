//! # 关节状态快照
//!
//! 以"关节名称 → 位置"的形式保存一次观测，可从 TOML 或 JSON 文件读取
//! （按扩展名判断），并实现 [`JointStateSource`]，供离线运行控制周期使用。
//!
//! ```toml
//! [positions]
//! torsoYaw = 0.0
//! leftElbowPitch = -0.4
//! ```

use crate::error::{ConfigError, FileFormat, Result};
use imitation_control::{ControlError, JointStateSource};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// 关节状态快照
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JointSnapshot {
    /// 关节位置（弧度）
    #[serde(default)]
    pub positions: BTreeMap<String, f64>,
}

impl JointSnapshot {
    /// 创建空快照
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有给定关节位于 0
    pub fn zeros<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        JointSnapshot {
            positions: names.into_iter().map(|name| (name.into(), 0.0)).collect(),
        }
    }

    /// 设置单个关节位置
    pub fn set(&mut self, name: &str, position: f64) {
        self.positions.insert(name.to_string(), position);
    }

    /// 从文件加载（`.toml` 或 `.json`）
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::detect(path)?;
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

        let snapshot = match format {
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };
        Ok(snapshot)
    }

    /// 保存到文件（`.toml` 或 `.json`）
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match FileFormat::detect(path)? {
            FileFormat::Toml => toml::to_string_pretty(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
        };
        fs::write(path, content).map_err(|e| ConfigError::io(path, e))
    }
}

impl JointStateSource for JointSnapshot {
    fn joint_position(&self, name: &str) -> std::result::Result<f64, ControlError> {
        self.positions.get(name).copied().ok_or_else(|| ControlError::StateUnavailable {
            joint: name.to_string(),
        })
    }
}

/// 可在控制周期之间更新的快照
///
/// 引擎持有状态源的所有权并只读访问；仿真循环通过 `RefCell` 在两个周期之间
/// 写入新的观测值。
#[derive(Debug, Default)]
pub struct SharedSnapshot {
    inner: RefCell<JointSnapshot>,
}

impl SharedSnapshot {
    /// 包装一个快照
    pub fn new(snapshot: JointSnapshot) -> Self {
        SharedSnapshot {
            inner: RefCell::new(snapshot),
        }
    }

    /// 按名称写入新位置（名称与值一一对应）
    pub fn update(&self, names: &[String], positions: &[f64]) {
        let mut inner = self.inner.borrow_mut();
        for (name, position) in names.iter().zip(positions) {
            inner.set(name, *position);
        }
    }

    /// 当前快照的副本
    pub fn snapshot(&self) -> JointSnapshot {
        self.inner.borrow().clone()
    }
}

impl JointStateSource for SharedSnapshot {
    fn joint_position(&self, name: &str) -> std::result::Result<f64, ControlError> {
        self.inner.borrow().joint_position(name)
    }
}
