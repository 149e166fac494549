//! 关节索引映射
//!
//! 把关节名称解析为合并关节向量中的索引，并给出各身体分段
//! （胸部、左臂、右臂）在合并向量中的起始偏移。
//!
//! # 布局
//!
//! 分段按固定顺序连续排列，中间没有空隙：
//!
//! ```text
//! | chest ... | left arm ... | right arm ... |
//! 0           chest          chest + left
//! ```
//!
//! # 示例
//!
//! ```rust
//! use imitation_control::{JointIndexMap, Segment, SegmentSizes};
//!
//! let names = vec!["torsoYaw".to_string(), "leftShoulderPitch".to_string(), "rightShoulderPitch".to_string()];
//! let map = JointIndexMap::new(names, SegmentSizes::new(1, 1, 1)).unwrap();
//!
//! assert_eq!(map.index_of("leftShoulderPitch").unwrap(), 1);
//! assert_eq!(map.right_arm_offset(), 2);
//! assert_eq!(map.segment_of(0), Some(Segment::Chest));
//! ```

use crate::error::{ControlError, Result};
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

/// 身体分段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Segment {
    /// 胸部（躯干）
    Chest,
    /// 左臂
    LeftArm,
    /// 右臂
    RightArm,
}

impl Segment {
    /// 所有分段，按合并向量中的排列顺序
    pub const ALL: [Segment; 3] = [Segment::Chest, Segment::LeftArm, Segment::RightArm];

    /// 分段名称
    pub const fn name(self) -> &'static str {
        match self {
            Segment::Chest => "chest",
            Segment::LeftArm => "left_arm",
            Segment::RightArm => "right_arm",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 每个分段的关节数量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentSizes {
    /// 胸部关节数
    pub chest: usize,
    /// 左臂关节数
    pub left_arm: usize,
    /// 右臂关节数
    pub right_arm: usize,
}

impl SegmentSizes {
    /// 创建分段大小
    pub const fn new(chest: usize, left_arm: usize, right_arm: usize) -> Self {
        SegmentSizes {
            chest,
            left_arm,
            right_arm,
        }
    }

    /// 关节总数
    pub const fn total(&self) -> usize {
        self.chest + self.left_arm + self.right_arm
    }

    /// 指定分段的关节数
    pub const fn get(&self, segment: Segment) -> usize {
        match segment {
            Segment::Chest => self.chest,
            Segment::LeftArm => self.left_arm,
            Segment::RightArm => self.right_arm,
        }
    }
}

/// 关节名称 ↔ 索引映射
///
/// 构造后不可变：关节的索引和所属分段在控制器生命周期内保持不变。
#[derive(Debug, Clone)]
pub struct JointIndexMap {
    names: Vec<String>,
    lookup: HashMap<String, usize>,
    sizes: SegmentSizes,
}

impl JointIndexMap {
    /// 从有序关节名称列表和分段大小构建映射
    ///
    /// # 错误
    ///
    /// - 名称数量与分段总数不一致：`InvalidConfiguration`
    /// - 名称重复：`InvalidConfiguration`
    pub fn new(names: Vec<String>, sizes: SegmentSizes) -> Result<Self> {
        if names.len() != sizes.total() {
            return Err(ControlError::InvalidConfiguration(format!(
                "{} joint names but segments declare {} (chest {}, left arm {}, right arm {})",
                names.len(),
                sizes.total(),
                sizes.chest,
                sizes.left_arm,
                sizes.right_arm
            )));
        }

        let mut lookup = HashMap::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            if lookup.insert(name.clone(), index).is_some() {
                return Err(ControlError::InvalidConfiguration(format!(
                    "duplicate joint name '{}'",
                    name
                )));
            }
        }

        Ok(JointIndexMap {
            names,
            lookup,
            sizes,
        })
    }

    /// 关节总数
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// 是否没有任何关节
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// 有序关节名称
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// 分段大小
    pub fn sizes(&self) -> SegmentSizes {
        self.sizes
    }

    /// 按名称查找索引
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.lookup.get(name).copied().ok_or_else(|| ControlError::JointNotFound {
            name: name.to_string(),
        })
    }

    /// 按索引查找名称
    pub fn name_of(&self, index: usize) -> Result<&str> {
        self.names.get(index).map(String::as_str).ok_or(ControlError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// 胸部在合并向量中的起始索引（恒为 0）
    #[inline]
    pub fn chest_offset(&self) -> usize {
        0
    }

    /// 左臂在合并向量中的起始索引
    #[inline]
    pub fn left_arm_offset(&self) -> usize {
        self.sizes.chest
    }

    /// 右臂在合并向量中的起始索引
    #[inline]
    pub fn right_arm_offset(&self) -> usize {
        self.sizes.chest + self.sizes.left_arm
    }

    /// 指定分段的起始索引
    pub fn offset(&self, segment: Segment) -> usize {
        match segment {
            Segment::Chest => self.chest_offset(),
            Segment::LeftArm => self.left_arm_offset(),
            Segment::RightArm => self.right_arm_offset(),
        }
    }

    /// 指定分段覆盖的索引范围
    pub fn segment_range(&self, segment: Segment) -> Range<usize> {
        let start = self.offset(segment);
        start..start + self.sizes.get(segment)
    }

    /// 索引所属的分段，越界返回 `None`
    pub fn segment_of(&self, index: usize) -> Option<Segment> {
        Segment::ALL.into_iter().find(|&segment| self.segment_range(segment).contains(&index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn upper_body() -> JointIndexMap {
        JointIndexMap::new(
            names(&[
                "torsoYaw",
                "torsoPitch",
                "leftShoulderPitch",
                "leftShoulderRoll",
                "leftElbowPitch",
                "rightShoulderPitch",
                "rightShoulderRoll",
                "rightElbowPitch",
            ]),
            SegmentSizes::new(2, 3, 3),
        )
        .unwrap()
    }

    #[test]
    fn test_offsets_one_joint_per_segment() {
        let map = JointIndexMap::new(names(&["a", "b", "c"]), SegmentSizes::new(1, 1, 1)).unwrap();
        assert_eq!(map.chest_offset(), 0);
        assert_eq!(map.left_arm_offset(), 1);
        assert_eq!(map.right_arm_offset(), 2);
    }

    #[test]
    fn test_offsets_contiguous_layout() {
        let map = upper_body();
        assert_eq!(map.len(), 8);
        assert_eq!(map.left_arm_offset(), 2);
        assert_eq!(map.right_arm_offset(), 5);
        assert_eq!(map.segment_range(Segment::Chest), 0..2);
        assert_eq!(map.segment_range(Segment::LeftArm), 2..5);
        assert_eq!(map.segment_range(Segment::RightArm), 5..8);
    }

    #[test]
    fn test_index_of() {
        let map = upper_body();
        assert_eq!(map.index_of("torsoYaw").unwrap(), 0);
        assert_eq!(map.index_of("leftElbowPitch").unwrap(), 4);
        assert_eq!(map.index_of("rightElbowPitch").unwrap(), 7);

        let err = map.index_of("neckYaw").unwrap_err();
        assert_eq!(
            err,
            ControlError::JointNotFound {
                name: "neckYaw".to_string()
            }
        );
    }

    #[test]
    fn test_name_of_and_segment_of() {
        let map = upper_body();
        assert_eq!(map.name_of(5).unwrap(), "rightShoulderPitch");
        assert!(matches!(
            map.name_of(8),
            Err(ControlError::IndexOutOfRange { index: 8, len: 8 })
        ));

        assert_eq!(map.segment_of(1), Some(Segment::Chest));
        assert_eq!(map.segment_of(2), Some(Segment::LeftArm));
        assert_eq!(map.segment_of(7), Some(Segment::RightArm));
        assert_eq!(map.segment_of(8), None);
    }

    #[test]
    fn test_empty_segment() {
        // 没有胸部关节时，左臂从 0 开始
        let map = JointIndexMap::new(names(&["l", "r"]), SegmentSizes::new(0, 1, 1)).unwrap();
        assert_eq!(map.left_arm_offset(), 0);
        assert_eq!(map.right_arm_offset(), 1);
        assert_eq!(map.segment_of(0), Some(Segment::LeftArm));
    }

    #[test]
    fn test_rejects_count_mismatch() {
        let err = JointIndexMap::new(names(&["a", "b"]), SegmentSizes::new(1, 1, 1)).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = JointIndexMap::new(names(&["a", "b", "a"]), SegmentSizes::new(1, 1, 1)).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(format!("{}", err).contains("duplicate joint name 'a'"));
    }

    #[test]
    fn test_segment_display() {
        assert_eq!(Segment::Chest.to_string(), "chest");
        assert_eq!(Segment::LeftArm.to_string(), "left_arm");
        assert_eq!(Segment::RightArm.to_string(), "right_arm");
    }
}
