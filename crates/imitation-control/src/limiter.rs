//! 加速度限幅
//!
//! 把计算出的加速度逐关节钳位到 `[min, max]`。限幅是一条输出策略，
//! 不是错误：超限值被静默替换为边界值，只记录 debug 日志。

use crate::error::{ControlError, Result};

/// 钳位单个值：`max(min, min(value, max))`
///
/// 调用方保证 `min <= max`（构造时已校验）。
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(value.min(max))
}

/// 单个关节的加速度上下限
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccelLimit {
    /// 最小加速度
    pub min: f64,
    /// 最大加速度
    pub max: f64,
}

impl AccelLimit {
    /// 创建上下限
    pub const fn new(min: f64, max: f64) -> Self {
        AccelLimit { min, max }
    }

    /// 对称上下限 `[-limit, limit]`
    pub const fn symmetric(limit: f64) -> Self {
        AccelLimit {
            min: -limit,
            max: limit,
        }
    }

    /// 不限幅
    pub const fn unbounded() -> Self {
        AccelLimit {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }
}

/// 逐关节加速度限幅器
#[derive(Debug, Clone)]
pub struct AccelerationLimiter {
    limits: Vec<AccelLimit>,
}

impl AccelerationLimiter {
    /// 创建限幅器
    ///
    /// # 错误
    ///
    /// 任意关节 `min > max` 或出现 NaN 时返回 `InvalidConfiguration`。
    pub fn new(limits: Vec<AccelLimit>) -> Result<Self> {
        for (index, limit) in limits.iter().enumerate() {
            if limit.min.is_nan() || limit.max.is_nan() || limit.min > limit.max {
                return Err(ControlError::InvalidConfiguration(format!(
                    "joint {} acceleration limits inverted: min {} > max {}",
                    index, limit.min, limit.max
                )));
            }
        }
        Ok(AccelerationLimiter { limits })
    }

    /// 关节数
    pub fn len(&self) -> usize {
        self.limits.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    /// 全部上下限
    pub fn limits(&self) -> &[AccelLimit] {
        &self.limits
    }

    /// 原地钳位，返回被钳位的关节索引
    pub fn apply(&self, values: &mut [f64]) -> Vec<usize> {
        debug_assert_eq!(values.len(), self.limits.len());

        let mut clamped = Vec::new();
        for (index, (value, limit)) in values.iter_mut().zip(self.limits.iter()).enumerate() {
            let bounded = clamp(*value, limit.min, limit.max);
            if bounded != *value {
                tracing::debug!(
                    "Joint {} acceleration {:.4} clamped to {:.4} (limits: [{:.4}, {:.4}])",
                    index,
                    *value,
                    bounded,
                    limit.min,
                    limit.max
                );
                *value = bounded;
                clamped.push(index);
            }
        }
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(110.0, -5.0, 5.0), 5.0);
        assert_eq!(clamp(-110.0, -5.0, 5.0), -5.0);
        assert_eq!(clamp(1.5, -5.0, 5.0), 1.5);
        assert_eq!(clamp(5.0, -5.0, 5.0), 5.0);
        assert_eq!(clamp(3.0, 2.0, 2.0), 2.0);
    }

    #[test]
    fn test_apply_reports_clamped_joints() {
        let limiter = AccelerationLimiter::new(vec![
            AccelLimit::symmetric(5.0),
            AccelLimit::new(-1.0, 2.0),
            AccelLimit::unbounded(),
        ])
        .unwrap();

        let mut values = [110.0, -3.0, 1e9];
        let clamped = limiter.apply(&mut values);

        assert_eq!(values, [5.0, -1.0, 1e9]);
        assert_eq!(clamped, vec![0, 1]);
    }

    #[test]
    fn test_apply_within_limits_is_identity() {
        let limiter = AccelerationLimiter::new(vec![AccelLimit::symmetric(10.0); 3]).unwrap();
        let mut values = [1.0, -2.0, 9.999];
        assert!(limiter.apply(&mut values).is_empty());
        assert_eq!(values, [1.0, -2.0, 9.999]);
    }

    #[test]
    fn test_rejects_inverted_limits() {
        let err = AccelerationLimiter::new(vec![AccelLimit::symmetric(1.0), AccelLimit::new(2.0, 1.0)])
            .unwrap_err();
        assert!(err.is_configuration_error());
        assert!(format!("{}", err).contains("joint 1"));

        assert!(AccelerationLimiter::new(vec![AccelLimit::new(f64::NAN, 1.0)]).is_err());
    }
}
