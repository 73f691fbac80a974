//! # 本底（连续谱）估计与扣除
//!
//! 在调用方指定的无峰区间上拟合多项式本底，并在整条能量轴上求值后扣除。
//!
//! ## 算法概述
//! 1. 校验区间：半开区间 [start, end)，start ≤ end ≤ 能谱长度
//! 2. 拼接所有区间内的 (能量, 计数) 样本
//! 3. 最小二乘拟合 `degree` 次多项式
//! 4. 输出计数 = 原计数 − 本底曲线，能量轴不变
//!
//! 无峰区间属于调用方的领域知识，这里不做推断。
//!
//! ## 依赖关系
//! - 被 `xrf/pipeline.rs` 调用
//! - 使用 `xrf/polyfit.rs`

use crate::error::{Result, XrfError};
use crate::models::Spectrum;
use crate::xrf::polyfit::{self, Polynomial};

use log::debug;

/// 默认本底多项式次数
pub const DEFAULT_BACKGROUND_DEGREE: usize = 3;

/// 无峰区间 [start, end)
pub type Region = (usize, usize);

/// 拟合得到的本底模型
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundModel {
    polynomial: Polynomial,
    /// 参与拟合的样本数
    sample_count: usize,
}

impl BackgroundModel {
    /// 在无峰区间上拟合本底
    pub fn fit(spectrum: &Spectrum, regions: &[Region], degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(XrfError::InvalidParameter(
                "background degree must be at least 1".to_string(),
            ));
        }
        validate_regions(regions, spectrum.len())?;

        let mut x = Vec::new();
        let mut y = Vec::new();
        for &(start, end) in regions {
            x.extend_from_slice(&spectrum.energy()[start..end]);
            y.extend_from_slice(&spectrum.counts()[start..end]);
        }

        debug!(
            "fitting degree-{} background to {} samples from {} regions",
            degree,
            x.len(),
            regions.len()
        );

        let polynomial = polyfit::fit(&x, &y, degree)?;
        Ok(BackgroundModel {
            polynomial,
            sample_count: x.len(),
        })
    }

    /// 在给定能量轴上求本底曲线
    pub fn curve(&self, energy: &[f64]) -> Vec<f64> {
        energy.iter().map(|&e| self.polynomial.eval(e)).collect()
    }

    /// 扣除本底，返回新能谱
    pub fn subtract(&self, spectrum: &Spectrum) -> Result<Spectrum> {
        let counts = spectrum
            .counts()
            .iter()
            .zip(self.curve(spectrum.energy()))
            .map(|(c, b)| c - b)
            .collect();
        spectrum.with_counts(counts)
    }

    pub fn degree(&self) -> usize {
        self.polynomial.degree()
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }
}

/// 拟合并扣除本底，同时返回所用模型（供求本底曲线）
pub fn subtract_background(
    spectrum: &Spectrum,
    regions: &[Region],
    degree: usize,
) -> Result<(Spectrum, BackgroundModel)> {
    let model = BackgroundModel::fit(spectrum, regions, degree)?;
    let subtracted = model.subtract(spectrum)?;
    Ok((subtracted, model))
}

/// 校验区间下标
fn validate_regions(regions: &[Region], len: usize) -> Result<()> {
    if regions.is_empty() {
        return Err(XrfError::InvalidParameter(
            "at least one background region is required".to_string(),
        ));
    }
    for &(start, end) in regions {
        if start > end {
            return Err(XrfError::InvalidParameter(format!(
                "background region [{}, {}) has start after end",
                start, end
            )));
        }
        if end > len {
            return Err(XrfError::InvalidParameter(format!(
                "background region [{}, {}) exceeds spectrum length {}",
                start, end, len
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// 线性本底 + 中间一个峰
    fn linear_with_peak() -> Spectrum {
        let energy: Vec<f64> = (0..9).map(|i| 1.0 + i as f64 * 0.5).collect();
        let counts: Vec<f64> = energy
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let peak = match i {
                    3 => 20.0,
                    4 => 50.0,
                    5 => 20.0,
                    _ => 0.0,
                };
                10.0 + 4.0 * e + peak
            })
            .collect();
        Spectrum::new("linear", energy, counts).unwrap()
    }

    #[test]
    fn test_linear_background_removed() {
        let s = linear_with_peak();
        let (out, model) = subtract_background(&s, &[(0, 3), (6, 9)], 1).unwrap();
        assert_eq!(model.sample_count(), 6);

        for i in [0, 1, 2, 6, 7, 8] {
            assert!(out.counts()[i].abs() < 1e-9, "residual at {}", i);
        }
        assert!((out.counts()[4] - 50.0).abs() < 1e-9);
        assert!((out.counts()[3] - 20.0).abs() < 1e-9);
        assert_eq!(out.energy(), s.energy());
    }

    #[test]
    fn test_round_trip_restores_counts() {
        let s = linear_with_peak();
        let model = BackgroundModel::fit(&s, &[(0, 4), (5, 9)], 2).unwrap();
        let subtracted = model.subtract(&s).unwrap();
        let background = model.curve(s.energy());

        for ((sub, bg), orig) in subtracted.counts().iter().zip(&background).zip(s.counts()) {
            assert!((sub + bg - orig).abs() < 1e-9);
        }
        assert_eq!(model.sample_count(), 8);
        assert_eq!(model.degree(), 2);
    }

    #[test]
    fn test_insufficient_points() {
        let s = linear_with_peak();
        let err = subtract_background(&s, &[(0, 2), (8, 9)], 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn test_region_out_of_range() {
        let s = linear_with_peak();
        let err = subtract_background(&s, &[(0, 3), (6, 12)], 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert!(err.to_string().contains("exceeds spectrum length 9"));

        let err = subtract_background(&s, &[(5, 2)], 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn test_zero_degree_and_empty_regions_rejected() {
        let s = linear_with_peak();
        assert_eq!(
            subtract_background(&s, &[(0, 3)], 0).unwrap_err().kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(
            subtract_background(&s, &[], 1).unwrap_err().kind(),
            ErrorKind::InvalidParameter
        );
    }
}
