//! 打印每个关节的增益和加速度上下限

use super::{load_config, load_snapshot};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// 增益命令参数
#[derive(Args, Debug)]
pub struct GainsCommand {
    /// 机器人描述文件（TOML）
    #[arg(short, long)]
    pub config: PathBuf,
}

impl GainsCommand {
    pub fn execute(self) -> Result<()> {
        let config = load_config(&self.config)?;
        let engine = config.build_engine(load_snapshot(None, &config)?)?;

        println!(
            "{:>3}  {:<24} {:<10} {:>8} {:>8} {:>10} {:>10}",
            "#", "joint", "segment", "kp", "kd", "min_accel", "max_accel"
        );

        let joints = engine.joints();
        for (index, limit) in engine.limiter().limits().iter().enumerate() {
            let segment = joints.segment_of(index).map(|s| s.to_string()).unwrap_or_default();
            println!(
                "{:>3}  {:<24} {:<10} {:>8.3} {:>8.3} {:>10.3} {:>10.3}",
                index,
                joints.name_of(index)?,
                segment,
                engine.kp(index)?,
                engine.kd(index)?,
                limit.min,
                limit.max
            );
        }
        Ok(())
    }
}
