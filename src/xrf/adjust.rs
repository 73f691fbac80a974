//! # 能谱调整（噪声 / 缩放 / 平滑）
//!
//! 用于对处理流程做压力测试的数据扰动工具。
//!
//! ## 处理顺序（固定）
//! 1. 叠加 N(0, σ) 高斯噪声
//! 2. 乘以高度系数
//! 3. Savitzky-Golay 平滑（窗口 > 1 时）
//!
//! 先加噪后平滑，平滑才能压制高频扰动；顺序不可交换。
//!
//! ## 依赖关系
//! - 被 `xrf/pipeline.rs` 调用
//! - 使用 `xrf/smoothing.rs`
//! - 使用 `rand` / `rand_distr` 生成噪声（随机源由调用方传入，可设种子）

use crate::error::{Result, XrfError};
use crate::models::Spectrum;
use crate::xrf::smoothing;

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// 调整参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustParams {
    /// 噪声标准差，0 表示不加噪声
    pub noise_sigma: f64,
    /// 高度系数
    pub height_multiplier: f64,
    /// 平滑窗口长度（奇数），1 表示不平滑
    pub smoothing_window: usize,
}

impl Default for AdjustParams {
    fn default() -> Self {
        AdjustParams {
            noise_sigma: 0.0,
            height_multiplier: 1.0,
            smoothing_window: 1,
        }
    }
}

/// 按固定顺序调整能谱，返回新能谱
pub fn adjust<R: Rng + ?Sized>(
    spectrum: &Spectrum,
    params: &AdjustParams,
    rng: &mut R,
) -> Result<Spectrum> {
    // 参数校验先于任何计算
    if !params.noise_sigma.is_finite() || params.noise_sigma < 0.0 {
        return Err(XrfError::InvalidParameter(format!(
            "noise sigma must be a finite value >= 0, got {}",
            params.noise_sigma
        )));
    }
    if !params.height_multiplier.is_finite() {
        return Err(XrfError::InvalidParameter(format!(
            "height multiplier must be finite, got {}",
            params.height_multiplier
        )));
    }
    if params.smoothing_window == 0 {
        return Err(XrfError::InvalidParameter(
            "smoothing window must be an odd integer >= 1, got 0".to_string(),
        ));
    }
    if params.smoothing_window > 1 {
        smoothing::validate_window(params.smoothing_window, spectrum.len())?;
    }

    let mut counts = spectrum.counts().to_vec();

    if params.noise_sigma > 0.0 {
        debug!(
            "adding gaussian noise (sigma = {}) to '{}'",
            params.noise_sigma,
            spectrum.name()
        );
        let normal = Normal::new(0.0, params.noise_sigma)
            .map_err(|e| XrfError::InvalidParameter(e.to_string()))?;
        for c in counts.iter_mut() {
            *c += normal.sample(&mut *rng);
        }
    }

    if params.height_multiplier != 1.0 {
        for c in counts.iter_mut() {
            *c *= params.height_multiplier;
        }
    }

    if params.smoothing_window > 1 {
        debug!("smoothing with window {}", params.smoothing_window);
        counts = smoothing::savgol_smooth(&counts, params.smoothing_window)?;
    }

    spectrum.with_counts(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Spectrum {
        let energy: Vec<f64> = (0..30).map(|i| i as f64 * 0.1).collect();
        let counts: Vec<f64> = (0..30).map(|i| 5.0 + (i % 7) as f64).collect();
        Spectrum::new("sample", energy, counts).unwrap()
    }

    #[test]
    fn test_identity_parameters() {
        let s = sample();
        let mut rng = StdRng::seed_from_u64(1);
        let out = adjust(&s, &AdjustParams::default(), &mut rng).unwrap();
        assert_eq!(out, s);
    }

    #[test]
    fn test_height_scaling() {
        let s = sample();
        let params = AdjustParams {
            height_multiplier: 2.5,
            ..AdjustParams::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let out = adjust(&s, &params, &mut rng).unwrap();
        for (a, b) in out.counts().iter().zip(s.counts()) {
            assert!((a - 2.5 * b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_noise_is_reproducible_with_seed() {
        let s = sample();
        let params = AdjustParams {
            noise_sigma: 3.0,
            ..AdjustParams::default()
        };
        let a = adjust(&s, &params, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = adjust(&s, &params, &mut StdRng::seed_from_u64(42)).unwrap();
        let c = adjust(&s, &params, &mut StdRng::seed_from_u64(43)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a.counts(), s.counts());
        assert_eq!(a.energy(), s.energy());
    }

    #[test]
    fn test_noise_then_scale_order() {
        // 噪声在缩放之前：结果 = (c + n) * k
        let s = sample();
        let noisy = adjust(
            &s,
            &AdjustParams {
                noise_sigma: 1.0,
                ..AdjustParams::default()
            },
            &mut StdRng::seed_from_u64(7),
        )
        .unwrap();
        let both = adjust(
            &s,
            &AdjustParams {
                noise_sigma: 1.0,
                height_multiplier: 3.0,
                smoothing_window: 1,
            },
            &mut StdRng::seed_from_u64(7),
        )
        .unwrap();
        for (a, b) in both.counts().iter().zip(noisy.counts()) {
            assert!((a - 3.0 * b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_smoothing_reduces_noise() {
        let energy: Vec<f64> = (0..200).map(|i| i as f64).collect();
        let flat = Spectrum::new("flat", energy, vec![100.0; 200]).unwrap();
        let noisy_only = AdjustParams {
            noise_sigma: 5.0,
            ..AdjustParams::default()
        };
        let noisy_smoothed = AdjustParams {
            smoothing_window: 11,
            ..noisy_only
        };

        let raw = adjust(&flat, &noisy_only, &mut StdRng::seed_from_u64(3)).unwrap();
        let smooth = adjust(&flat, &noisy_smoothed, &mut StdRng::seed_from_u64(3)).unwrap();

        let spread = |s: &Spectrum| s.counts().iter().map(|c| (c - 100.0).powi(2)).sum::<f64>();
        assert!(spread(&smooth) < spread(&raw));
    }

    #[test]
    fn test_invalid_parameters() {
        let s = sample();
        let mut rng = StdRng::seed_from_u64(0);

        let even = AdjustParams {
            smoothing_window: 6,
            ..AdjustParams::default()
        };
        assert_eq!(
            adjust(&s, &even, &mut rng).unwrap_err().kind(),
            ErrorKind::InvalidParameter
        );

        let oversized = AdjustParams {
            smoothing_window: 31,
            ..AdjustParams::default()
        };
        assert_eq!(
            adjust(&s, &oversized, &mut rng).unwrap_err().kind(),
            ErrorKind::InsufficientData
        );

        let zero_window = AdjustParams {
            smoothing_window: 0,
            ..AdjustParams::default()
        };
        assert_eq!(
            adjust(&s, &zero_window, &mut rng).unwrap_err().kind(),
            ErrorKind::InvalidParameter
        );

        let negative_sigma = AdjustParams {
            noise_sigma: -1.0,
            ..AdjustParams::default()
        };
        assert_eq!(
            adjust(&s, &negative_sigma, &mut rng).unwrap_err().kind(),
            ErrorKind::InvalidParameter
        );
    }

    #[test]
    fn test_negative_multiplier_accepted() {
        let s = sample();
        let params = AdjustParams {
            height_multiplier: -1.0,
            ..AdjustParams::default()
        };
        let out = adjust(&s, &params, &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(out.counts().iter().all(|c| *c < 0.0));
    }
}
