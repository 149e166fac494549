//! # Imitation Tools - 文件驱动的协作者实现
//!
//! **依赖原则**: 只依赖 `imitation-control`，控制核心本身不做任何 I/O
//!
//! ## 包含模块
//!
//! - `description` - TOML 机器人描述（实现 `RobotDescription`）
//! - `snapshot` - 关节状态快照（实现 `JointStateSource`）
//! - `trajectory_io` - 轨迹 JSON 读写
//! - `error` - 工具层错误类型

pub mod description;
pub mod error;
pub mod snapshot;
pub mod trajectory_io;

// 重新导出常用类型
pub use description::{JointConfig, RobotConfig};
pub use error::{ConfigError, Result};
pub use snapshot::{JointSnapshot, SharedSnapshot};
pub use trajectory_io::{load_trajectory, reserve_accelerations, save_trajectory};
