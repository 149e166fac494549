//! # 轨迹文件读写
//!
//! 轨迹以 JSON 保存，结构与 [`JointTrajectory`] 一致：
//!
//! ```json
//! {
//!   "joint_names": ["torsoYaw", "leftElbowPitch", "rightElbowPitch"],
//!   "points": [
//!     { "positions": [0.0, 0.1, 0.1], "accelerations": [0.0, 0.0, 0.0],
//!       "time_from_start": { "secs": 0, "nanos": 10000000 } }
//!   ]
//! }
//! ```

use crate::error::{ConfigError, Result};
use imitation_control::JointTrajectory;
use std::fs;
use std::path::Path;

/// 从 JSON 文件加载轨迹
pub fn load_trajectory<P: AsRef<Path>>(path: P) -> Result<JointTrajectory> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let trajectory: JointTrajectory = serde_json::from_str(&content)?;
    tracing::debug!(
        "Loaded trajectory from {} ({} points)",
        path.display(),
        trajectory.points.len()
    );
    Ok(trajectory)
}

/// 把轨迹保存为 JSON 文件
pub fn save_trajectory<P: AsRef<Path>>(trajectory: &JointTrajectory, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(trajectory)?;
    fs::write(path, content).map_err(|e| ConfigError::io(path, e))
}

/// 把缺失的加速度数组补成与位置数组同样长度的零
///
/// 很多轨迹来源不填写加速度；控制引擎要求两个数组长度一致。
pub fn reserve_accelerations(trajectory: &mut JointTrajectory) {
    for point in &mut trajectory.points {
        if point.accelerations.is_empty() {
            point.accelerations = vec![0.0; point.positions.len()];
        }
    }
}
