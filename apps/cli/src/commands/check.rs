//! 检查机器人描述
//!
//! 加载配置并构造控制引擎，打印关节布局和分段偏移

use super::{load_config, load_snapshot};
use anyhow::Result;
use clap::Args;
use imitation_control::Segment;
use std::path::PathBuf;

/// 检查命令参数
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// 机器人描述文件（TOML）
    #[arg(short, long)]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn execute(self) -> Result<()> {
        let config = load_config(&self.config)?;
        let engine = config.build_engine(load_snapshot(None, &config)?)?;

        println!("✅ 配置有效: {}", self.config.display());
        println!("   关节总数: {}", engine.total_joints());
        println!(
            "   控制周期: {:.6} s ({:.1} Hz)",
            engine.dt(),
            1.0 / engine.dt()
        );

        for segment in Segment::ALL {
            let range = engine.joints().segment_range(segment);
            println!(
                "   {:<10} offset {:>3}  joints {:>3}",
                segment.to_string(),
                range.start,
                range.len()
            );
        }
        Ok(())
    }
}
