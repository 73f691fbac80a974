//! # XRF 能谱数据模型
//!
//! 能量轴与计数轴按下标对齐的一维能谱。构造后不可变，
//! 所有调整操作都生成新的 `Spectrum`。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `xrf/` 使用
//! - 无外部模块依赖

use crate::error::{Result, XrfError};
use serde::{Deserialize, Serialize};

/// XRF 能谱
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// 能谱名称（通常为文件名）
    name: String,
    /// 能量轴 (keV)，假定单调不减
    energy: Vec<f64>,
    /// 光子计数
    counts: Vec<f64>,
}

impl Spectrum {
    /// 创建能谱，两列长度必须相等且非空
    pub fn new(name: impl Into<String>, energy: Vec<f64>, counts: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if energy.len() != counts.len() {
            return Err(XrfError::MalformedInput(format!(
                "spectrum '{}': energy has {} values but counts has {}",
                name,
                energy.len(),
                counts.len()
            )));
        }
        if energy.is_empty() {
            return Err(XrfError::MalformedInput(format!(
                "spectrum '{}' contains no samples",
                name
            )));
        }
        Ok(Spectrum {
            name,
            energy,
            counts,
        })
    }

    /// 使用新的计数列生成能谱（能量轴与名称不变）
    pub fn with_counts(&self, counts: Vec<f64>) -> Result<Self> {
        Spectrum::new(self.name.clone(), self.energy.clone(), counts)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn energy(&self) -> &[f64] {
        &self.energy
    }

    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// 采样点数
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// (能量, 计数) 点对迭代器
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.energy.iter().copied().zip(self.counts.iter().copied())
    }

    /// 能量范围 (min, max)
    pub fn energy_range(&self) -> (f64, f64) {
        let min = self.energy.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.energy.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = Spectrum::new("bad", vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_empty_spectrum_rejected() {
        let err = Spectrum::new("empty", vec![], vec![]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_with_counts_keeps_energy_axis() {
        let s = Spectrum::new("s", vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]).unwrap();
        let t = s.with_counts(vec![0.0, 0.0, 0.0]).unwrap();

        assert_eq!(t.energy(), s.energy());
        assert_eq!(t.name(), "s");
        assert_eq!(s.counts(), &[4.0, 5.0, 6.0]);
        assert_eq!(s.energy_range(), (1.0, 3.0));
    }
}
