//! 命令定义和实现

pub mod check;
pub mod gains;
pub mod init;
pub mod step;
pub mod trajectory;

pub use check::CheckCommand;
pub use gains::GainsCommand;
pub use init::InitCommand;
pub use step::StepCommand;
pub use trajectory::TrajectoryCommand;

use anyhow::{Context, Result};
use imitation_tools::{JointSnapshot, RobotConfig};
use std::path::{Path, PathBuf};

/// 加载机器人描述
pub(crate) fn load_config(path: &Path) -> Result<RobotConfig> {
    RobotConfig::load_from_file(path)
        .with_context(|| format!("加载机器人描述失败: {}", path.display()))
}

/// 加载关节状态快照；未指定时所有关节位于 0
pub(crate) fn load_snapshot(path: Option<&PathBuf>, config: &RobotConfig) -> Result<JointSnapshot> {
    use imitation_control::RobotDescription;

    match path {
        Some(path) => JointSnapshot::load_from_file(path)
            .with_context(|| format!("加载关节状态失败: {}", path.display())),
        None => Ok(JointSnapshot::zeros(config.joint_names())),
    }
}

/// 格式化一组数值
pub(crate) fn format_values(values: &[f64]) -> String {
    values.iter().map(|v| format!("{:.4}", v)).collect::<Vec<_>>().join(", ")
}
