//! PD 加速度控制引擎
//!
//! 每个控制周期（固定周期 `dt`）执行一次离散 PD 控制律，输出每个关节的加速度设定值。
//!
//! # 算法
//!
//! ```text
//! e[k]      = q_des - q[k]
//! de/dt     = (e[k] - e[k-1]) / dt
//! a[k]      = clamp(Kp ⊙ e[k] + Kd ⊙ de/dt, a_min, a_max)
//! ```
//!
//! 其中 `⊙` 是逐关节相乘（对角增益），`dt` 在构造时固定，运行期间不变。
//!
//! # 并发
//!
//! 引擎是单线程、同步的，内部不加锁：调用方必须保证同一实例上的控制周期
//! 以及增益修改不会并发执行（`&mut self` 已经在类型上保证了这一点）。
//!
//! # 示例
//!
//! ```rust
//! use imitation_control::{
//!     AccelLimit, ControlError, JointStateSource, PdControlEngine, RobotDescription, SegmentSizes,
//! };
//!
//! struct Robot;
//!
//! impl RobotDescription for Robot {
//!     fn joint_names(&self) -> Vec<String> {
//!         vec!["torsoYaw".into(), "leftElbow".into(), "rightElbow".into()]
//!     }
//!     fn segment_sizes(&self) -> SegmentSizes {
//!         SegmentSizes::new(1, 1, 1)
//!     }
//!     fn acceleration_limits(&self) -> Vec<AccelLimit> {
//!         vec![AccelLimit::symmetric(5.0); 3]
//!     }
//! }
//!
//! struct AtRest;
//!
//! impl JointStateSource for AtRest {
//!     fn joint_position(&self, _name: &str) -> Result<f64, ControlError> {
//!         Ok(0.0)
//!     }
//! }
//!
//! let mut engine = PdControlEngine::new(&Robot, AtRest, 0.01)?;
//! let accelerations = engine.compute_accelerations(&[1.0, 1.0, 1.0])?;
//! assert_eq!(accelerations, vec![5.0, 5.0, 5.0]);
//! # Ok::<(), ControlError>(())
//! ```

use crate::error::{ControlError, Result};
use crate::gains::{DefaultGains, GainStore};
use crate::joint::{JointIndexMap, Segment};
use crate::limiter::AccelerationLimiter;
use crate::provider::{JointStateSource, RobotDescription};
use crate::state::ControlState;
use crate::trajectory::{JointTrajectory, JointTrajectoryPoint};
use crate::vector::JointVector;

/// 最近一次控制周期的中间量（诊断用）
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleReport {
    /// 比例项输出 `Kp ⊙ e`
    pub proportional: Vec<f64>,
    /// 微分项输出 `Kd ⊙ de/dt`
    pub derivative: Vec<f64>,
    /// 限幅前的总输出
    pub unclamped: Vec<f64>,
    /// 被钳位的关节索引
    pub clamped_joints: Vec<usize>,
}

/// PD 加速度控制引擎
pub struct PdControlEngine<S> {
    joints: JointIndexMap,
    gains: GainStore,
    limiter: AccelerationLimiter,
    state: ControlState,
    dt: f64,
    source: S,
    /// 状态刷新缓冲区，刷新成功后才提交到 `state`
    scratch: Vec<f64>,
    cycles: u64,
    last_report: Option<CycleReport>,
}

impl<S: JointStateSource> PdControlEngine<S> {
    /// 创建控制引擎
    ///
    /// # 参数
    ///
    /// - `description`: 机器人描述（关节名称、分段大小、默认增益、加速度上下限）
    /// - `source`: 关节状态源
    /// - `dt`: 控制周期（秒），必须为有限正数
    ///
    /// # 错误
    ///
    /// 以下情况返回 `InvalidConfiguration`：
    /// - `dt <= 0` 或非有限值
    /// - 关节名称数量与分段总数不一致、名称重复
    /// - 默认增益或加速度上下限表长度与关节总数不一致
    /// - 任意关节 `min_accel > max_accel`
    pub fn new<D>(description: &D, source: S, dt: f64) -> Result<Self>
    where
        D: RobotDescription + ?Sized,
    {
        if !dt.is_finite() || dt <= 0.0 {
            tracing::warn!("Rejecting control period dt = {}", dt);
            return Err(ControlError::InvalidConfiguration(format!(
                "control period dt must be a finite positive number, got {}",
                dt
            )));
        }

        let joints = JointIndexMap::new(description.joint_names(), description.segment_sizes())?;
        let total = joints.len();

        let gains = GainStore::new(description.default_gains(), total)?;

        let limits = description.acceleration_limits();
        if limits.len() != total {
            return Err(ControlError::InvalidConfiguration(format!(
                "{} acceleration limits for {} joints",
                limits.len(),
                total
            )));
        }
        let limiter = AccelerationLimiter::new(limits)?;

        let sizes = joints.sizes();
        tracing::debug!(
            "PD engine ready: {} joints (chest {}, left arm {}, right arm {}), dt = {}s",
            total,
            sizes.chest,
            sizes.left_arm,
            sizes.right_arm,
            dt
        );

        Ok(PdControlEngine {
            joints,
            gains,
            limiter,
            state: ControlState::zeroed(total),
            dt,
            source,
            scratch: vec![0.0; total],
            cycles: 0,
            last_report: None,
        })
    }

    /// 执行一个控制周期
    ///
    /// 从状态源刷新当前位置，计算 PD 输出并钳位，返回关节索引顺序的加速度。
    ///
    /// # 错误
    ///
    /// - `desired.len() != total_joints`：`SizeMismatch`
    /// - 期望位置或观测位置含 NaN / 无穷大：`NonFinite`
    /// - 状态源无法提供某个关节：`StateUnavailable`
    ///
    /// 出错时控制状态保持不变。
    pub fn compute_accelerations(&mut self, desired: &[f64]) -> Result<Vec<f64>> {
        // 1. 校验输入
        self.check_len("desired positions", desired.len())?;
        check_finite("desired positions", desired)?;

        // 2-3. 先读入缓冲区，成功后再移动历史并提交
        self.read_observation()?;
        self.state.shift_history();
        self.state.current_position.copy_from_slice(&self.scratch);

        Ok(self.run_cycle(desired))
    }

    /// 消息驱动的控制周期
    ///
    /// 以轨迹点的 `positions` 作为期望位置执行一个周期，
    /// 并把结果写回同一个点的 `accelerations`。
    ///
    /// # 错误
    ///
    /// `positions` 或 `accelerations` 长度不等于关节总数时返回 `SizeMismatch`，
    /// 此时轨迹点和控制状态都不被修改。
    pub fn apply_to_trajectory(&mut self, point: &mut JointTrajectoryPoint) -> Result<()> {
        self.check_len("trajectory point positions", point.positions.len())?;
        self.check_len("trajectory point accelerations", point.accelerations.len())?;

        let output = self.compute_accelerations(&point.positions)?;
        point.accelerations.copy_from_slice(&output);
        Ok(())
    }

    /// 对整条轨迹逐点执行控制周期
    ///
    /// 每个轨迹点对应一个控制周期，按顺序执行。`joint_names` 为空时认为与控制器
    /// 关节顺序一致；否则必须是控制器关节的一个排列，位置和加速度按名称对应。
    ///
    /// 所有轨迹点在执行前统一校验。任何一个周期失败时，轨迹和控制状态
    /// 都保持调用前的样子：结果先暂存，全部成功后才写回。
    pub fn update_trajectory(&mut self, trajectory: &mut JointTrajectory) -> Result<()> {
        let order = self.trajectory_order(&trajectory.joint_names)?;

        for point in &trajectory.points {
            self.check_len("trajectory point positions", point.positions.len())?;
            self.check_len("trajectory point accelerations", point.accelerations.len())?;
            check_finite("trajectory point positions", &point.positions)?;
        }

        let saved_state = self.state.clone();
        let saved_cycles = self.cycles;
        let saved_report = self.last_report.clone();

        let mut desired = vec![0.0; self.joints.len()];
        let mut outputs = Vec::with_capacity(trajectory.points.len());
        for point in &trajectory.points {
            for (k, &index) in order.iter().enumerate() {
                desired[index] = point.positions[k];
            }
            match self.compute_accelerations(&desired) {
                Ok(output) => outputs.push(output),
                Err(err) => {
                    self.state = saved_state;
                    self.cycles = saved_cycles;
                    self.last_report = saved_report;
                    tracing::debug!(
                        "Trajectory rolled back after {} cycles: {}",
                        outputs.len(),
                        err
                    );
                    return Err(err);
                }
            }
        }

        for (point, output) in trajectory.points.iter_mut().zip(&outputs) {
            for (k, &index) in order.iter().enumerate() {
                point.accelerations[k] = output[index];
            }
        }

        tracing::debug!(
            "Filled accelerations for {} trajectory points",
            trajectory.points.len()
        );
        Ok(())
    }

    /// 用状态源的当前观测初始化位置历史
    ///
    /// 当前位置与上一次位置都设为观测值，误差历史清零。
    pub fn prime(&mut self) -> Result<()> {
        self.read_observation()?;
        self.state.seed(&self.scratch);
        Ok(())
    }

    fn read_observation(&mut self) -> Result<()> {
        self.source.read_positions(self.joints.names(), &mut self.scratch)?;
        check_finite("observed positions", &self.scratch)
    }
}

fn check_finite(what: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ControlError::NonFinite {
            what,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

impl<S> PdControlEngine<S> {
    fn run_cycle(&mut self, desired: &[f64]) -> Vec<f64> {
        // 4. 期望位置
        self.state.desired_position.copy_from_slice(desired);

        // 5. 误差
        self.state.error = &self.state.desired_position - &self.state.current_position;

        // 6. 比例项
        let p_out = self.gains.kp_vector().hadamard(&self.state.error);

        // 7. 误差变化率（浮点除法）
        let derivative = (&self.state.error - &self.state.previous_error).div_scalar(self.dt);

        // 8. 微分项
        let d_out = self.gains.kd_vector().hadamard(&derivative);

        // 9. 总输出
        let mut output: JointVector = &p_out + &d_out;
        let unclamped = output.clone();

        // 10. 钳位
        let clamped_joints = self.limiter.apply(output.as_mut_slice());

        debug_assert!(self.state.is_consistent());
        self.cycles += 1;
        tracing::trace!(
            "PD cycle {}: {} joints, {} clamped",
            self.cycles,
            output.len(),
            clamped_joints.len()
        );

        self.last_report = Some(CycleReport {
            proportional: p_out.into_vec(),
            derivative: d_out.into_vec(),
            unclamped: unclamped.into_vec(),
            clamped_joints,
        });

        // 11. 输出
        output.into_vec()
    }

    fn check_len(&self, what: &'static str, actual: usize) -> Result<()> {
        let expected = self.joints.len();
        if actual == expected {
            Ok(())
        } else {
            Err(ControlError::size_mismatch(what, expected, actual))
        }
    }

    /// 轨迹关节顺序 → 控制器关节索引
    fn trajectory_order(&self, names: &[String]) -> Result<Vec<usize>> {
        if names.is_empty() {
            return Ok((0..self.joints.len()).collect());
        }
        self.check_len("trajectory joint names", names.len())?;

        let mut seen = vec![false; self.joints.len()];
        let mut order = Vec::with_capacity(names.len());
        for name in names {
            let index = self.joints.index_of(name)?;
            if std::mem::replace(&mut seen[index], true) {
                return Err(ControlError::InvalidConfiguration(format!(
                    "trajectory lists joint '{}' more than once",
                    name
                )));
            }
            order.push(index);
        }
        Ok(order)
    }

    /// 清空位置和误差历史
    pub fn reset_history(&mut self) {
        self.state.clear();
        self.last_report = None;
    }

    /// 控制周期（秒）
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// 关节总数
    pub fn total_joints(&self) -> usize {
        self.joints.len()
    }

    /// 已执行的控制周期数
    pub fn cycle_count(&self) -> u64 {
        self.cycles
    }

    /// 最近一次控制周期的诊断信息
    pub fn last_report(&self) -> Option<&CycleReport> {
        self.last_report.as_ref()
    }

    /// 控制状态（只读）
    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// 关节索引映射
    pub fn joints(&self) -> &JointIndexMap {
        &self.joints
    }

    /// 加速度限幅器
    pub fn limiter(&self) -> &AccelerationLimiter {
        &self.limiter
    }

    /// 状态源
    pub fn source(&self) -> &S {
        &self.source
    }

    /// 状态源（可变）
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    // ==================== 关节映射 ====================

    /// 按名称查找关节索引
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.joints.index_of(name)
    }

    /// 胸部加速度在输出中的起始索引
    pub fn chest_offset(&self) -> usize {
        self.joints.chest_offset()
    }

    /// 左臂加速度在输出中的起始索引
    pub fn left_arm_offset(&self) -> usize {
        self.joints.left_arm_offset()
    }

    /// 右臂加速度在输出中的起始索引
    pub fn right_arm_offset(&self) -> usize {
        self.joints.right_arm_offset()
    }

    /// 从合并输出中截取某个分段
    pub fn segment_slice<'a>(&self, output: &'a [f64], segment: Segment) -> Result<&'a [f64]> {
        self.check_len("acceleration output", output.len())?;
        Ok(&output[self.joints.segment_range(segment)])
    }

    // ==================== 增益 ====================

    /// 增益存储
    pub fn gains(&self) -> &GainStore {
        &self.gains
    }

    /// 增益存储（可变）
    pub fn gains_mut(&mut self) -> &mut GainStore {
        &mut self.gains
    }

    /// 单个关节的 Kp
    pub fn kp(&self, index: usize) -> Result<f64> {
        self.gains.kp(index)
    }

    /// 单个关节的 Kd
    pub fn kd(&self, index: usize) -> Result<f64> {
        self.gains.kd(index)
    }

    /// 设置单个关节的 Kp
    pub fn set_kp(&mut self, value: f64, index: usize) -> Result<()> {
        self.gains.set_kp(value, index)
    }

    /// 设置单个关节的 Kd
    pub fn set_kd(&mut self, value: f64, index: usize) -> Result<()> {
        self.gains.set_kd(value, index)
    }

    /// 全部关节的 Kp
    pub fn all_kp(&self) -> Vec<f64> {
        self.gains.all_kp()
    }

    /// 全部关节的 Kd
    pub fn all_kd(&self) -> Vec<f64> {
        self.gains.all_kd()
    }

    /// 批量设置 Kp（原子）
    pub fn set_all_kp(&mut self, values: &[f64]) -> Result<()> {
        self.gains.set_all_kp(values)
    }

    /// 批量设置 Kd（原子）
    pub fn set_all_kd(&mut self, values: &[f64]) -> Result<()> {
        self.gains.set_all_kd(values)
    }

    /// 默认增益表
    pub fn default_gains(&self) -> &DefaultGains {
        self.gains.defaults()
    }

    /// 恢复默认增益
    pub fn reset_gains_to_defaults(&mut self) {
        self.gains.reset_to_defaults();
    }
}

impl<S> std::fmt::Debug for PdControlEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdControlEngine")
            .field("joints", &self.joints.len())
            .field("dt", &self.dt)
            .field("cycles", &self.cycles)
            .finish_non_exhaustive()
    }
}
