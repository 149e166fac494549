//! # Imitation CLI
//!
//! 上半身 PD 加速度控制引擎的命令行工具。
//!
//! ```bash
//! # 生成示例机器人描述
//! imitation-cli init --output robot.toml
//!
//! # 检查描述并打印关节布局
//! imitation-cli check --config robot.toml
//!
//! # 运行 10 个控制周期
//! imitation-cli step --config robot.toml --desired 0.1,0,0,... --cycles 10
//!
//! # 为轨迹文件填写加速度
//! imitation-cli trajectory --config robot.toml --input traj.json --output out.json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod validation;

use commands::{CheckCommand, GainsCommand, InitCommand, StepCommand, TrajectoryCommand};

/// Imitation CLI - PD 加速度控制命令行工具
#[derive(Parser, Debug)]
#[command(name = "imitation-cli")]
#[command(about = "Command-line interface for the upper-body PD acceleration engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 生成示例机器人描述
    Init {
        #[command(flatten)]
        args: InitCommand,
    },

    /// 检查机器人描述
    Check {
        #[command(flatten)]
        args: CheckCommand,
    },

    /// 打印关节增益和加速度上下限
    Gains {
        #[command(flatten)]
        args: GainsCommand,
    },

    /// 运行控制周期
    Step {
        #[command(flatten)]
        args: StepCommand,
    },

    /// 为轨迹填写加速度
    Trajectory {
        #[command(flatten)]
        args: TrajectoryCommand,
    },
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("imitation_cli=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { args } => args.execute(),
        Commands::Check { args } => args.execute(),
        Commands::Gains { args } => args.execute(),
        Commands::Step { args } => args.execute(),
        Commands::Trajectory { args } => args.execute(),
    }
}
