//! # analyze 子命令 CLI 定义
//!
//! 对单个能谱文件或目录中的一批能谱运行处理流程：
//! 调整 → (可选) 扣本底 → 检峰 → 定量 → 标注。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/analyze.rs`

use crate::error::{Result, XrfError};
use crate::xrf::background::Region;
use crate::xrf::DetectionMethod;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// 输出格式
// ─────────────────────────────────────────────────────────────

/// analyze 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum AnalyzeOutputFormat {
    /// PNG image of the processed spectrum with labelled peaks
    Png,
    /// SVG vector image
    Svg,
    /// CSV peak table (index, energy, area, element)
    Csv,
    /// XY data file of the processed spectrum
    Xy,
    /// CSV of the processed spectrum (energy, counts, and the subtracted background if any)
    SpectrumCsv,
}

impl AnalyzeOutputFormat {
    /// 对应的文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            AnalyzeOutputFormat::Png => "png",
            AnalyzeOutputFormat::Svg => "svg",
            AnalyzeOutputFormat::Csv => "csv",
            AnalyzeOutputFormat::Xy => "xy",
            AnalyzeOutputFormat::SpectrumCsv => "csv",
        }
    }

    /// 批量模式输出文件名后缀
    pub fn file_suffix(&self) -> &'static str {
        match self {
            AnalyzeOutputFormat::Xy | AnalyzeOutputFormat::SpectrumCsv => "spectrum",
            _ => "peaks",
        }
    }
}

/// 解析无峰区间列表，格式 "0-40,200-256"（半开下标区间）
pub fn parse_regions(input: &str) -> Result<Vec<Region>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|part| {
            let (start, end) = part
                .split_once('-')
                .ok_or_else(|| XrfError::InvalidRange(format!("{} (expected start-end)", part)))?;
            let start: usize = start
                .trim()
                .parse()
                .map_err(|_| XrfError::InvalidRange(part.to_string()))?;
            let end: usize = end
                .trim()
                .parse()
                .map_err(|_| XrfError::InvalidRange(part.to_string()))?;
            Ok((start, end))
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────
// analyze 参数
// ─────────────────────────────────────────────────────────────

/// analyze 子命令参数
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input: spectrum file (.csv/.xy) or directory of spectra
    pub input: PathBuf,

    /// Output: file path (single mode) or directory (batch mode)
    #[arg(short, long, default_value = "xrf_peaks.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<AnalyzeOutputFormat>,

    /// Element table CSV (columns: symbol,energy); built-in table if omitted
    #[arg(long, env = "XRF_ELEMENT_TABLE")]
    pub elements: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────
    // 检峰参数
    // ─────────────────────────────────────────────────────────────
    /// Peak detection strategy
    #[arg(short, long, value_enum, default_value = "threshold", env = "XRF_METHOD")]
    pub method: DetectionMethod,

    /// Detection threshold in counts (minimum height for prominence strategy)
    #[arg(short, long, default_value_t = 100.0, env = "XRF_THRESHOLD")]
    pub threshold: f64,

    /// Minimum prominence (prominence strategy only)
    #[arg(long, default_value_t = 0.0)]
    pub min_prominence: f64,

    // ─────────────────────────────────────────────────────────────
    // 调整参数
    // ─────────────────────────────────────────────────────────────
    /// Standard deviation of injected Gaussian noise (counts)
    #[arg(long, default_value_t = 0.0, env = "XRF_NOISE_SIGMA")]
    pub noise_sigma: f64,

    /// Multiply all counts by this factor
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub height_multiplier: f64,

    /// Savitzky-Golay window length (odd, 1 = no smoothing)
    #[arg(short = 'w', long, default_value_t = 1, env = "XRF_SMOOTHING_WINDOW")]
    pub smoothing_window: usize,

    /// Random seed for noise injection
    #[arg(long, env = "XRF_SEED")]
    pub seed: Option<u64>,

    // ─────────────────────────────────────────────────────────────
    // 本底参数
    // ─────────────────────────────────────────────────────────────
    /// Subtract a polynomial background fitted to the non-peak regions
    #[arg(short = 'b', long, default_value_t = false)]
    pub subtract_background: bool,

    /// Non-peak index regions, half-open (e.g., "0-40,200-256")
    #[arg(long, default_value = "")]
    pub regions: String,

    /// Background polynomial degree
    #[arg(long, default_value_t = 3)]
    pub degree: usize,

    /// Half width of the peak area window (samples)
    #[arg(long, default_value_t = 5)]
    pub half_width: usize,

    // ─────────────────────────────────────────────────────────────
    // 绘图参数
    // ─────────────────────────────────────────────────────────────
    /// Number of largest peaks labelled with their element
    #[arg(long, default_value_t = 10)]
    pub label_count: usize,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Title for the plot (default: spectrum name)
    #[arg(long)]
    pub title: Option<String>,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for input files (batch mode)
    #[arg(long, default_value = "*.csv,*.xy")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_regions() {
        assert_eq!(parse_regions("0-3, 6-9").unwrap(), vec![(0, 3), (6, 9)]);
        assert!(parse_regions("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_regions_errors() {
        assert_eq!(
            parse_regions("0:3").unwrap_err().kind(),
            ErrorKind::InvalidParameter
        );
        assert!(parse_regions("a-3").is_err());
        assert!(parse_regions("-3").is_err());
    }
}
