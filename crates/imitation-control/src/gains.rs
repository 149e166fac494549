//! PD 增益存储
//!
//! 每个关节独立的比例增益（Kp）和微分增益（Kd），按关节索引排列。
//!
//! 批量设置是原子的：长度不对时直接报错，已有增益保持不变。

use crate::error::{ControlError, Result};
use crate::joint::{Segment, SegmentSizes};
use crate::vector::JointVector;

/// 胸部关节默认 Kp
pub const DEFAULT_CHEST_KP: f64 = 8.0;
/// 胸部关节默认 Kd
pub const DEFAULT_CHEST_KD: f64 = 1.2;
/// 手臂关节默认 Kp
pub const DEFAULT_ARM_KP: f64 = 5.0;
/// 手臂关节默认 Kd
pub const DEFAULT_ARM_KD: f64 = 0.8;

/// 默认增益表
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefaultGains {
    /// 每个关节的默认 Kp
    pub kp: Vec<f64>,
    /// 每个关节的默认 Kd
    pub kd: Vec<f64>,
}

impl DefaultGains {
    /// 内置的按分段默认值表（胸部与手臂不同）
    pub fn compiled(sizes: SegmentSizes) -> Self {
        let mut kp = Vec::with_capacity(sizes.total());
        let mut kd = Vec::with_capacity(sizes.total());

        for segment in Segment::ALL {
            let (segment_kp, segment_kd) = match segment {
                Segment::Chest => (DEFAULT_CHEST_KP, DEFAULT_CHEST_KD),
                Segment::LeftArm | Segment::RightArm => (DEFAULT_ARM_KP, DEFAULT_ARM_KD),
            };
            let count = sizes.get(segment);
            kp.extend(std::iter::repeat_n(segment_kp, count));
            kd.extend(std::iter::repeat_n(segment_kd, count));
        }

        DefaultGains { kp, kd }
    }
}

/// 增益存储
#[derive(Debug, Clone)]
pub struct GainStore {
    kp: JointVector,
    kd: JointVector,
    defaults: DefaultGains,
}

impl GainStore {
    /// 用默认增益创建存储，当前增益初始化为默认值
    ///
    /// # 错误
    ///
    /// 默认表长度与关节总数不一致时返回 `InvalidConfiguration`。
    pub fn new(defaults: DefaultGains, total_joints: usize) -> Result<Self> {
        if defaults.kp.len() != total_joints || defaults.kd.len() != total_joints {
            return Err(ControlError::InvalidConfiguration(format!(
                "default gains cover {} Kp / {} Kd entries, expected {}",
                defaults.kp.len(),
                defaults.kd.len(),
                total_joints
            )));
        }

        Ok(GainStore {
            kp: JointVector::from_slice(&defaults.kp),
            kd: JointVector::from_slice(&defaults.kd),
            defaults,
        })
    }

    /// 关节总数
    #[inline]
    pub fn len(&self) -> usize {
        self.kp.len()
    }

    /// 是否没有任何关节
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kp.is_empty()
    }

    /// 获取单个关节的 Kp
    pub fn kp(&self, index: usize) -> Result<f64> {
        self.check_index(index)?;
        Ok(self.kp[index])
    }

    /// 获取单个关节的 Kd
    pub fn kd(&self, index: usize) -> Result<f64> {
        self.check_index(index)?;
        Ok(self.kd[index])
    }

    /// 设置单个关节的 Kp
    pub fn set_kp(&mut self, value: f64, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.kp[index] = value;
        Ok(())
    }

    /// 设置单个关节的 Kd
    pub fn set_kd(&mut self, value: f64, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.kd[index] = value;
        Ok(())
    }

    /// 全部关节的 Kp（关节索引顺序）
    pub fn all_kp(&self) -> Vec<f64> {
        self.kp.as_slice().to_vec()
    }

    /// 全部关节的 Kd（关节索引顺序）
    pub fn all_kd(&self) -> Vec<f64> {
        self.kd.as_slice().to_vec()
    }

    /// 批量设置 Kp，长度不符时不做任何修改
    pub fn set_all_kp(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.len() {
            return Err(ControlError::size_mismatch("Kp gains", self.len(), values.len()));
        }
        self.kp.copy_from_slice(values);
        Ok(())
    }

    /// 批量设置 Kd，长度不符时不做任何修改
    pub fn set_all_kd(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.len() {
            return Err(ControlError::size_mismatch("Kd gains", self.len(), values.len()));
        }
        self.kd.copy_from_slice(values);
        Ok(())
    }

    /// 默认增益表
    pub fn defaults(&self) -> &DefaultGains {
        &self.defaults
    }

    /// 恢复默认增益
    pub fn reset_to_defaults(&mut self) {
        self.kp.copy_from_slice(&self.defaults.kp);
        self.kd.copy_from_slice(&self.defaults.kd);
    }

    pub(crate) fn kp_vector(&self) -> &JointVector {
        &self.kp
    }

    pub(crate) fn kd_vector(&self) -> &JointVector {
        &self.kd
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(ControlError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }
}
