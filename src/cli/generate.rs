//! # generate 子命令 CLI 定义
//!
//! 生成合成 XRF 能谱（连续谱 + 元素发射线 + 可选噪声）。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/generate.rs`

use clap::Args;
use std::path::PathBuf;

/// generate 子命令参数
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Output file (.csv or .xy)
    #[arg(short, long, default_value = "synthetic_xrf.csv")]
    pub output: PathBuf,

    /// Elements whose emission lines are added (comma separated symbols)
    #[arg(short, long, value_delimiter = ',', default_value = "Fe,Cu,Zn")]
    pub elements: Vec<String>,

    /// Element table CSV used to look up line energies
    #[arg(long, env = "XRF_ELEMENT_TABLE")]
    pub table: Option<PathBuf>,

    /// Energy range in keV (e.g., "0-20")
    #[arg(short, long, default_value = "0-20")]
    pub range: String,

    /// Number of energy channels
    #[arg(short, long, default_value_t = 1024)]
    pub points: usize,

    /// Peak height of every emission line (counts)
    #[arg(long, default_value_t = 1000.0)]
    pub amplitude: f64,

    /// Gaussian line width sigma (keV)
    #[arg(long, default_value_t = 0.08)]
    pub line_width: f64,

    /// Continuum offset (counts)
    #[arg(long, default_value_t = 60.0, allow_negative_numbers = true)]
    pub continuum_offset: f64,

    /// Continuum slope (counts per keV)
    #[arg(long, default_value_t = -2.0, allow_negative_numbers = true)]
    pub continuum_slope: f64,

    /// Continuum curvature (counts per keV²)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub continuum_curvature: f64,

    /// Gaussian noise sigma (counts)
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed for noise
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Overwrite an existing output file
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
