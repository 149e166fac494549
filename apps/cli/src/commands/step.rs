//! 运行若干控制周期
//!
//! 从状态快照读取当前位置，按给定目标位置计算关节加速度。
//! `--simulate` 时把加速度积分回快照，观察闭环收敛。

use super::{format_values, load_config, load_snapshot};
use crate::validation::parse_joint_list;
use anyhow::{Context, Result};
use clap::Args;
use imitation_control::{RobotDescription, Segment};
use imitation_tools::SharedSnapshot;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// 周期运行参数
#[derive(Args, Debug)]
pub struct StepCommand {
    /// 机器人描述文件（TOML）
    #[arg(short, long)]
    pub config: PathBuf,

    /// 关节状态快照（TOML 或 JSON），缺省所有关节位于 0
    #[arg(short, long)]
    pub state: Option<PathBuf>,

    /// 目标位置（逗号分隔，按关节索引顺序）
    #[arg(short, long)]
    pub desired: String,

    /// 周期数
    #[arg(short = 'n', long, default_value_t = 1)]
    pub cycles: u64,

    /// 把加速度积分到快照中（闭环仿真）
    #[arg(long)]
    pub simulate: bool,

    /// 按控制周期实时运行
    #[arg(long)]
    pub realtime: bool,
}

impl StepCommand {
    pub fn execute(self) -> Result<()> {
        if self.cycles == 0 {
            anyhow::bail!("cycles must be at least 1");
        }

        let config = load_config(&self.config)?;
        let names = config.joint_names();
        let desired = parse_joint_list(&self.desired, names.len())?;

        let shared = SharedSnapshot::new(load_snapshot(self.state.as_ref(), &config)?);
        let mut engine = config.build_engine(&shared).context("构造控制引擎失败")?;
        engine.prime().context("读取初始关节状态失败")?;

        let dt = engine.dt();
        let period = if self.realtime {
            Some(
                Duration::try_from_secs_f64(dt)
                    .with_context(|| format!("控制周期 {} s 无法用于实时运行", dt))?,
            )
        } else {
            None
        };
        let sleeper = spin_sleep::SpinSleeper::default();
        let mut next_tick = Instant::now();

        let mut positions = engine.state().current_position().to_vec();
        let mut velocities = vec![0.0; names.len()];
        let mut accelerations = Vec::new();

        for cycle in 0..self.cycles {
            accelerations = engine
                .compute_accelerations(&desired)
                .with_context(|| format!("第 {} 个周期计算失败", cycle + 1))?;

            if let Some(report) = engine.last_report() {
                if !report.clamped_joints.is_empty() {
                    tracing::debug!(
                        "cycle {}: clamped joints {:?}",
                        cycle + 1,
                        report.clamped_joints
                    );
                }
            }

            if self.simulate {
                for ((p, v), a) in positions.iter_mut().zip(&mut velocities).zip(&accelerations) {
                    *v += a * dt;
                    *p += *v * dt;
                }
                shared.update(&names, &positions);
            }

            if let Some(period) = period {
                // 绝对时间锚点，避免误差累积
                next_tick = next_tick
                    .checked_add(period)
                    .with_context(|| format!("控制周期 {} s 无法用于实时运行", dt))?;
                let now = Instant::now();
                if next_tick > now {
                    sleeper.sleep(next_tick - now);
                } else {
                    tracing::warn!("cycle {} overran by {:?}", cycle + 1, now - next_tick);
                }
            }
        }

        println!("周期数: {}", engine.cycle_count());
        for segment in Segment::ALL {
            let slice = engine.segment_slice(&accelerations, segment)?;
            println!("{:<10} [{}]", segment.to_string(), format_values(slice));
        }

        if self.simulate {
            println!("位置误差: [{}]", format_values(engine.state().error()));
        }

        Ok(())
    }
}
