//! # 多项式最小二乘拟合
//!
//! 平滑（Savitzky-Golay）与本底估计共用的拟合内核。
//!
//! ## 算法概述
//! 1. 将 x 平移缩放到 [-1, 1] 附近以改善条件数
//! 2. 构造正规方程 (VᵀV) c = Vᵀy，V 为 Vandermonde 矩阵
//! 3. 部分主元 Gauss-Jordan 消元求解
//!
//! ## 依赖关系
//! - 被 `xrf/smoothing.rs` 和 `xrf/background.rs` 调用
//! - 无外部依赖

use crate::error::{Result, XrfError};

/// 主元下限，低于此值视为奇异
const PIVOT_EPS: f64 = 1e-12;

/// 拟合得到的多项式
///
/// 以 t = (x - shift) / scale 为自变量存储系数，`coefficients[k]` 对应 tᵏ。
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
    shift: f64,
    scale: f64,
}

impl Polynomial {
    /// 多项式次数
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// 在 x 处求值（Horner）
    pub fn eval(&self, x: f64) -> f64 {
        let t = (x - self.shift) / self.scale;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * t + c)
    }
}

/// 对 (x, y) 做 `degree` 次最小二乘多项式拟合
pub fn fit(x: &[f64], y: &[f64], degree: usize) -> Result<Polynomial> {
    if x.len() != y.len() {
        return Err(XrfError::InvalidParameter(format!(
            "fit input lengths differ: {} x values, {} y values",
            x.len(),
            y.len()
        )));
    }

    let p = degree + 1;
    if x.len() < p {
        return Err(XrfError::InsufficientData(format!(
            "{} sample points cannot determine a degree-{} polynomial (need at least {})",
            x.len(),
            degree,
            p
        )));
    }

    // 平移缩放
    let min = x.iter().copied().fold(f64::INFINITY, f64::min);
    let max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let shift = 0.5 * (min + max);
    let half_span = 0.5 * (max - min);
    let scale = if half_span > 0.0 { half_span } else { 1.0 };

    // 正规方程，增广矩阵 [VᵀV | Vᵀy]
    let mut aug = vec![vec![0.0; p + 1]; p];
    let mut powers = vec![0.0; 2 * p - 1];
    for (&xi, &yi) in x.iter().zip(y) {
        let t = (xi - shift) / scale;
        let mut tk = 1.0;
        for (k, power) in powers.iter_mut().enumerate() {
            *power = tk;
            if k < p {
                aug[k][p] += tk * yi;
            }
            tk *= t;
        }
        for (row, aug_row) in aug.iter_mut().enumerate() {
            for col in 0..p {
                aug_row[col] += powers[row + col];
            }
        }
    }

    let coefficients = solve(aug, p).ok_or_else(|| {
        XrfError::InsufficientData(format!(
            "degree-{} fit is singular: sample points do not span enough distinct x values",
            degree
        ))
    })?;

    Ok(Polynomial {
        coefficients,
        shift,
        scale,
    })
}

/// Gauss-Jordan 消元，返回解向量；奇异时返回 None
fn solve(mut aug: Vec<Vec<f64>>, p: usize) -> Option<Vec<f64>> {
    // 以对角线最大元为尺度判断奇异
    let norm = (0..p).map(|i| aug[i][i].abs()).fold(0.0_f64, f64::max);
    if norm == 0.0 {
        return None;
    }

    for col in 0..p {
        let max_row = (col..p).max_by(|&a, &b| {
            aug[a][col]
                .abs()
                .partial_cmp(&aug[b][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        aug.swap(col, max_row);

        let pivot = aug[col][col];
        if !pivot.is_finite() || pivot.abs() < PIVOT_EPS * norm {
            return None;
        }

        for v in aug[col].iter_mut() {
            *v /= pivot;
        }

        for row in 0..p {
            if row != col {
                let factor = aug[row][col];
                if factor != 0.0 {
                    for j in col..=p {
                        aug[row][j] -= factor * aug[col][j];
                    }
                }
            }
        }
    }

    Some(aug.into_iter().map(|row| row[p]).collect())
}
