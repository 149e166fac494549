//! 关节向量
//!
//! 以关节索引顺序存放每个关节一个标量的动态数组，提供逐元素运算
//! （加、减、逐元素乘、除以标量）。
//!
//! 增益、误差、输出全部是"对角"量：每个关节只和自己的增益相乘，
//! 因此不需要 O(n²) 的矩阵表示。
//!
//! # 示例
//!
//! ```rust
//! use imitation_control::JointVector;
//!
//! let kp = JointVector::from(vec![10.0, 10.0, 10.0]);
//! let error = JointVector::from(vec![1.0, 0.5, -1.0]);
//!
//! let p_out = kp.hadamard(&error);
//! assert_eq!(p_out.as_slice(), &[10.0, 5.0, -10.0]);
//!
//! let halved = p_out.div_scalar(2.0);
//! assert_eq!(halved.into_vec(), vec![5.0, 2.5, -5.0]);
//! ```

use std::ops::{Add, Index, IndexMut, Sub};

/// 关节向量
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct JointVector {
    data: Vec<f64>,
}

impl JointVector {
    /// 创建全零向量
    pub fn zeros(len: usize) -> Self {
        JointVector {
            data: vec![0.0; len],
        }
    }

    /// 从切片复制
    pub fn from_slice(values: &[f64]) -> Self {
        JointVector {
            data: values.to_vec(),
        }
    }

    /// 长度
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 内部数据的只读切片
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// 内部数据的可变切片
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// 取出内部数据（消耗 self）
    #[inline]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// 迭代器
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    /// 用切片覆盖全部元素（长度必须一致）
    pub fn copy_from_slice(&mut self, values: &[f64]) {
        self.data.copy_from_slice(values);
    }

    /// 把全部元素置零
    pub fn fill_zero(&mut self) {
        self.data.iter_mut().for_each(|v| *v = 0.0);
    }

    /// 映射转换
    pub fn map<F>(&self, f: F) -> JointVector
    where
        F: FnMut(&f64) -> f64,
    {
        JointVector {
            data: self.data.iter().map(f).collect(),
        }
    }

    /// 与另一个向量按元素组合
    ///
    /// 两个向量长度必须相同。
    pub fn map_with<F>(&self, other: &JointVector, mut f: F) -> JointVector
    where
        F: FnMut(f64, f64) -> f64,
    {
        debug_assert_eq!(self.len(), other.len(), "joint vector length mismatch");
        JointVector {
            data: self.data.iter().zip(other.data.iter()).map(|(&a, &b)| f(a, b)).collect(),
        }
    }

    /// 逐元素乘（对角增益 × 向量）
    pub fn hadamard(&self, other: &JointVector) -> JointVector {
        self.map_with(other, |a, b| a * b)
    }

    /// 除以标量（浮点除法）
    pub fn div_scalar(&self, divisor: f64) -> JointVector {
        self.map(|v| v / divisor)
    }
}

impl From<Vec<f64>> for JointVector {
    fn from(data: Vec<f64>) -> Self {
        JointVector { data }
    }
}

impl From<JointVector> for Vec<f64> {
    fn from(vector: JointVector) -> Self {
        vector.data
    }
}

impl Add for &JointVector {
    type Output = JointVector;

    fn add(self, rhs: &JointVector) -> JointVector {
        self.map_with(rhs, |a, b| a + b)
    }
}

impl Sub for &JointVector {
    type Output = JointVector;

    fn sub(self, rhs: &JointVector) -> JointVector {
        self.map_with(rhs, |a, b| a - b)
    }
}

impl Index<usize> for JointVector {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<usize> for JointVector {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.data[index]
    }
}
