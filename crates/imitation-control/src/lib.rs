//! # Imitation Control
//!
//! 上半身人形机器人（胸部 + 左臂 + 右臂）的关节加速度 PD 控制核心（无 I/O 依赖）。
//!
//! ## 模块
//!
//! - `joint`: 关节名称 ↔ 索引映射、分段偏移
//! - `gains`: 每关节 Kp/Kd 增益存储与默认增益表
//! - `limiter`: 加速度逐关节限幅
//! - `state`: 控制状态（位置/误差历史）
//! - `engine`: PD 控制引擎（每周期一次）
//! - `provider`: 外部协作者 trait（机器人描述、关节状态源）
//! - `trajectory`: 关节轨迹消息数据结构
//! - `vector`: 逐元素关节向量运算
//!
//! ## 数据流
//!
//! ```text
//! JointStateSource ──► current_position ─┐
//!                                         ├─► PdControlEngine ─► accelerations
//! desired positions ─► desired_position ─┘      (GainStore, AccelerationLimiter)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - 为数据类型派生 `Serialize` / `Deserialize`

pub mod engine;
pub mod error;
pub mod gains;
pub mod joint;
pub mod limiter;
pub mod provider;
pub mod state;
pub mod trajectory;
pub mod vector;

// 重新导出常用类型
pub use engine::{CycleReport, PdControlEngine};
pub use error::{ControlError, Result};
pub use gains::{DefaultGains, GainStore};
pub use joint::{JointIndexMap, Segment, SegmentSizes};
pub use limiter::{AccelLimit, AccelerationLimiter, clamp};
pub use provider::{JointStateSource, RobotDescription};
pub use state::ControlState;
pub use trajectory::{JointTrajectory, JointTrajectoryPoint};
pub use vector::JointVector;
