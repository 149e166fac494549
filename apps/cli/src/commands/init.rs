//! 生成示例机器人描述

use anyhow::{Context, Result};
use clap::Args;
use imitation_tools::RobotConfig;
use std::path::PathBuf;

/// 生成示例配置参数
#[derive(Args, Debug)]
pub struct InitCommand {
    /// 输出文件路径
    #[arg(short, long, default_value = "robot.toml")]
    pub output: PathBuf,

    /// 覆盖已存在的文件
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn execute(self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!("{} 已存在，使用 --force 覆盖", self.output.display());
        }

        RobotConfig::example()
            .save_to_file(&self.output)
            .with_context(|| format!("写入配置文件失败: {}", self.output.display()))?;

        println!("✅ 已生成示例配置: {}", self.output.display());
        Ok(())
    }
}
