//! # 峰检测
//!
//! 两种可互换的检测策略，均返回升序、无重复的峰位下标。
//!
//! ## 策略
//! - `Threshold`: 严格局部极大且计数 > 阈值，单次遍历 O(n)
//! - `Prominence`: 严格局部极大且计数 ≥ 阈值（最小高度），
//!   再按突出度（峰高减去两侧谷底中较高者）过滤
//!
//! 首尾采样点缺少一侧邻点，任何策略下都不会被判为峰。
//!
//! ## 参考
//! - scipy.signal.find_peaks / peak_prominences
//!
//! ## 依赖关系
//! - 被 `xrf/pipeline.rs` 调用
//! - 无外部模块依赖

use crate::error::{Result, XrfError};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 峰检测方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    /// Strict local maxima above the threshold
    #[default]
    Threshold,
    /// Minimum-height local maxima filtered by prominence
    Prominence,
}

impl std::fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionMethod::Threshold => write!(f, "threshold"),
            DetectionMethod::Prominence => write!(f, "prominence"),
        }
    }
}

/// 峰检测器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakDetector {
    method: DetectionMethod,
    threshold: f64,
    min_prominence: f64,
}

impl PeakDetector {
    /// 创建检测器，阈值必须为有限非负数
    pub fn new(method: DetectionMethod, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(XrfError::InvalidParameter(format!(
                "detection threshold must be a finite value >= 0, got {}",
                threshold
            )));
        }
        Ok(PeakDetector {
            method,
            threshold,
            min_prominence: 0.0,
        })
    }

    /// 设置最小突出度（仅 `Prominence` 策略使用）
    pub fn with_min_prominence(mut self, min_prominence: f64) -> Result<Self> {
        if !min_prominence.is_finite() || min_prominence < 0.0 {
            return Err(XrfError::InvalidParameter(format!(
                "minimum prominence must be a finite value >= 0, got {}",
                min_prominence
            )));
        }
        self.min_prominence = min_prominence;
        Ok(self)
    }

    /// 检测峰位
    pub fn detect(&self, counts: &[f64]) -> Vec<usize> {
        match self.method {
            DetectionMethod::Threshold => threshold_peaks(counts, self.threshold),
            DetectionMethod::Prominence => {
                prominence_peaks(counts, self.threshold, self.min_prominence)
            }
        }
    }
}

/// 严格局部极大下标（不含首尾）
fn local_maxima(counts: &[f64]) -> impl Iterator<Item = usize> + '_ {
    counts
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] > w[0] && w[1] > w[2])
        .map(|(i, _)| i + 1)
}

/// 阈值策略
pub fn threshold_peaks(counts: &[f64], threshold: f64) -> Vec<usize> {
    local_maxima(counts)
        .filter(|&i| counts[i] > threshold)
        .collect()
}

/// 突出度策略
pub fn prominence_peaks(counts: &[f64], min_height: f64, min_prominence: f64) -> Vec<usize> {
    local_maxima(counts)
        .filter(|&i| counts[i] >= min_height)
        .filter(|&i| prominence(counts, i) >= min_prominence)
        .collect()
}

/// 计算峰的突出度
///
/// 向两侧搜索，直到遇到严格更高的点或边界，取两侧最低点中较高者作为参考。
pub fn prominence(counts: &[f64], peak: usize) -> f64 {
    let height = counts[peak];

    let left_min = counts[..peak]
        .iter()
        .rev()
        .take_while(|&&v| v <= height)
        .copied()
        .fold(height, f64::min);

    let right_min = counts[peak + 1..]
        .iter()
        .take_while(|&&v| v <= height)
        .copied()
        .fold(height, f64::min);

    height - left_min.max(right_min)
}
