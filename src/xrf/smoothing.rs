//! # Savitzky-Golay 平滑
//!
//! 在长度为 `window` 的滑动窗口内拟合三次多项式，以窗口中心处的拟合值
//! 作为平滑结果。相比滑动平均能更好地保留峰形与峰位。
//!
//! ## 边界处理
//! 首尾各 `window / 2` 个点无法居中，直接用首个（末个）完整窗口的
//! 拟合多项式在这些位置求值。
//!
//! ## 参考
//! - Savitzky & Golay, Analytical Chemistry 36 (1964) 1627
//!
//! ## 依赖关系
//! - 被 `xrf/adjust.rs` 调用
//! - 使用 `xrf/polyfit.rs` 进行局部拟合

use crate::error::{Result, XrfError};
use crate::xrf::polyfit;

/// 局部拟合多项式次数
pub const SMOOTHING_ORDER: usize = 3;

/// 校验平滑窗口
///
/// 窗口必须为奇数、大于多项式次数，且不超过能谱长度。
pub fn validate_window(window: usize, len: usize) -> Result<()> {
    if window % 2 == 0 {
        return Err(XrfError::InvalidParameter(format!(
            "smoothing window must be odd, got {}",
            window
        )));
    }
    if window <= SMOOTHING_ORDER {
        return Err(XrfError::InvalidParameter(format!(
            "smoothing window {} must exceed the polynomial order {}",
            window, SMOOTHING_ORDER
        )));
    }
    if window > len {
        return Err(XrfError::InsufficientData(format!(
            "smoothing window {} exceeds spectrum length {}",
            window, len
        )));
    }
    Ok(())
}

/// 对信号做 Savitzky-Golay 平滑
pub fn savgol_smooth(data: &[f64], window: usize) -> Result<Vec<f64>> {
    validate_window(window, data.len())?;

    let n = data.len();
    let m = window / 2;
    let weights = center_weights(window)?;

    let mut smoothed = vec![0.0; n];
    for i in m..n - m {
        smoothed[i] = weights
            .iter()
            .zip(&data[i - m..=i + m])
            .map(|(w, y)| w * y)
            .sum();
    }

    // 首尾窗口
    let xs: Vec<f64> = (0..window).map(|i| i as f64).collect();
    let head = polyfit::fit(&xs, &data[..window], SMOOTHING_ORDER)?;
    for (i, value) in smoothed.iter_mut().enumerate().take(m) {
        *value = head.eval(i as f64);
    }
    let tail = polyfit::fit(&xs, &data[n - window..], SMOOTHING_ORDER)?;
    for k in window - m..window {
        smoothed[n - window + k] = tail.eval(k as f64);
    }

    Ok(smoothed)
}

/// 窗口中心处的卷积系数
///
/// 拟合是线性的：对单位脉冲逐一拟合并在中心求值即得各位置的权重。
fn center_weights(window: usize) -> Result<Vec<f64>> {
    let m = (window / 2) as f64;
    let xs: Vec<f64> = (0..window).map(|i| i as f64 - m).collect();
    let mut impulse = vec![0.0; window];

    let mut weights = Vec::with_capacity(window);
    for k in 0..window {
        impulse[k] = 1.0;
        weights.push(polyfit::fit(&xs, &impulse, SMOOTHING_ORDER)?.eval(0.0));
        impulse[k] = 0.0;
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_known_coefficients_window_5() {
        // 5 点三次 SG 平滑与二次相同：(-3, 12, 17, 12, -3) / 35
        let w = center_weights(5).unwrap();
        let expected = [-3.0, 12.0, 17.0, 12.0, -3.0];
        for (a, b) in w.iter().zip(expected.iter()) {
            assert!((a - b / 35.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_cubic_signal_preserved() {
        let data: Vec<f64> = (0..15)
            .map(|i| {
                let x = i as f64;
                1.0 + 0.3 * x - 0.05 * x * x + 0.002 * x * x * x
            })
            .collect();
        let smoothed = savgol_smooth(&data, 7).unwrap();
        assert_eq!(smoothed.len(), data.len());
        for (a, b) in smoothed.iter().zip(&data) {
            assert!((a - b).abs() < 1e-8);
        }
    }

    #[test]
    fn test_spike_is_attenuated() {
        let mut data = vec![10.0; 21];
        data[10] = 60.0;
        let smoothed = savgol_smooth(&data, 9).unwrap();
        assert!(smoothed[10] < 60.0);
        assert!(smoothed[10] > 10.0);
        assert!((smoothed[0] - 10.0).abs() < 1e-9);
        assert!((smoothed[20] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_validation() {
        assert_eq!(
            validate_window(4, 10).unwrap_err().kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(
            validate_window(3, 10).unwrap_err().kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(
            validate_window(11, 10).unwrap_err().kind(),
            ErrorKind::InsufficientData
        );
        assert!(validate_window(9, 9).is_ok());
    }

    #[test]
    fn test_window_equal_to_length() {
        let data = [1.0, 4.0, 2.0, 5.0, 3.0];
        let smoothed = savgol_smooth(&data, 5).unwrap();
        assert_eq!(smoothed.len(), 5);
    }
}
