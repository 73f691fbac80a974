//! # 峰面积定量
//!
//! 以峰位为中心、半宽固定的窗口内计数之和作为相对强度。
//! 窗口越界部分直接截断到有效下标范围，边缘峰属于正常情况。
//!
//! ## 依赖关系
//! - 被 `xrf/pipeline.rs` 调用
//! - 使用 `models/peak.rs` 的 QuantifiedPeak

use crate::error::{Result, XrfError};
use crate::models::{QuantifiedPeak, Spectrum};

/// 默认积分窗口半宽（采样点）
pub const DEFAULT_HALF_WIDTH: usize = 5;

/// 峰面积定量器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeakQuantifier {
    half_width: usize,
}

impl Default for PeakQuantifier {
    fn default() -> Self {
        PeakQuantifier {
            half_width: DEFAULT_HALF_WIDTH,
        }
    }
}

impl PeakQuantifier {
    pub fn new(half_width: usize) -> Self {
        PeakQuantifier { half_width }
    }

    /// 计算每个峰的窗口面积，输出顺序与输入一致
    pub fn quantify(&self, spectrum: &Spectrum, peaks: &[usize]) -> Result<Vec<QuantifiedPeak>> {
        let counts = spectrum.counts();
        let energy = spectrum.energy();

        peaks
            .iter()
            .map(|&index| {
                if index >= counts.len() {
                    return Err(XrfError::InvalidParameter(format!(
                        "peak index {} is outside spectrum of length {}",
                        index,
                        counts.len()
                    )));
                }
                let (lo, hi) = self.window(index, counts.len());
                Ok(QuantifiedPeak {
                    index,
                    energy: energy[index],
                    area: counts[lo..=hi].iter().sum(),
                })
            })
            .collect()
    }

    /// 截断后的闭区间窗口 [lo, hi]
    fn window(&self, index: usize, len: usize) -> (usize, usize) {
        let lo = index.saturating_sub(self.half_width);
        let hi = (index + self.half_width).min(len - 1);
        (lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn eleven_points() -> Spectrum {
        let energy: Vec<f64> = (0..11).map(|i| i as f64).collect();
        let counts: Vec<f64> = (0..11).map(|i| (i + 1) as f64).collect();
        Spectrum::new("eleven", energy, counts).unwrap()
    }

    #[test]
    fn test_left_clamped_window() {
        let s = eleven_points();
        let peaks = PeakQuantifier::default().quantify(&s, &[2]).unwrap();
        // counts[0..=7] = 1 + 2 + ... + 8
        assert_eq!(peaks[0].area, 36.0);
        assert_eq!(peaks[0].energy, 2.0);
        assert_eq!(peaks[0].index, 2);
    }

    #[test]
    fn test_boundary_windows() {
        let s = eleven_points();
        let q = PeakQuantifier::default();
        let peaks = q.quantify(&s, &[0, 10]).unwrap();
        // [0, 5] 与 [5, 10]
        assert_eq!(peaks[0].area, 21.0);
        assert_eq!(peaks[1].area, 51.0);
    }

    #[test]
    fn test_full_window_and_order() {
        let s = eleven_points();
        let peaks = PeakQuantifier::new(1).quantify(&s, &[7, 3]).unwrap();
        assert_eq!(peaks[0].index, 7);
        assert_eq!(peaks[0].area, 7.0 + 8.0 + 9.0);
        assert_eq!(peaks[1].area, 3.0 + 4.0 + 5.0);
    }

    #[test]
    fn test_index_out_of_range() {
        let s = eleven_points();
        let err = PeakQuantifier::default().quantify(&s, &[11]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn test_single_point_spectrum() {
        let s = Spectrum::new("one", vec![1.0], vec![4.0]).unwrap();
        let peaks = PeakQuantifier::default().quantify(&s, &[0]).unwrap();
        assert_eq!(peaks[0].area, 4.0);
    }
}
