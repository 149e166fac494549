//! 为轨迹文件填写加速度

use super::{load_config, load_snapshot};
use anyhow::{Context, Result};
use clap::Args;
use imitation_tools::{load_trajectory, reserve_accelerations, save_trajectory};
use std::path::PathBuf;

/// 轨迹命令参数
#[derive(Args, Debug)]
pub struct TrajectoryCommand {
    /// 机器人描述文件（TOML）
    #[arg(short, long)]
    pub config: PathBuf,

    /// 关节状态快照（TOML 或 JSON），缺省所有关节位于 0
    #[arg(short, long)]
    pub state: Option<PathBuf>,

    /// 输入轨迹（JSON）
    #[arg(short, long)]
    pub input: PathBuf,

    /// 输出轨迹（JSON），缺省覆盖输入文件
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl TrajectoryCommand {
    pub fn execute(self) -> Result<()> {
        let config = load_config(&self.config)?;
        let snapshot = load_snapshot(self.state.as_ref(), &config)?;
        let mut engine = config.build_engine(snapshot).context("构造控制引擎失败")?;

        let mut trajectory = load_trajectory(&self.input)
            .with_context(|| format!("加载轨迹失败: {}", self.input.display()))?;
        reserve_accelerations(&mut trajectory);

        engine.update_trajectory(&mut trajectory).context("计算轨迹加速度失败")?;

        let output = self.output.unwrap_or(self.input);
        save_trajectory(&trajectory, &output)
            .with_context(|| format!("写入轨迹失败: {}", output.display()))?;

        println!(
            "✅ 已填写 {} 个轨迹点: {}",
            trajectory.points.len(),
            output.display()
        );
        Ok(())
    }
}
