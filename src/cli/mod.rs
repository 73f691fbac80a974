//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `analyze`: 运行 XRF 处理流程（单文件或批量目录）
//! - `elements`: 查看元素参考表
//! - `generate`: 生成合成 XRF 能谱
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: analyze, elements, generate

pub mod analyze;
pub mod elements;
pub mod generate;

use clap::{Parser, Subcommand};

/// xrfquant - 半定量 XRF 能谱处理工具
#[derive(Parser)]
#[command(name = "xrfquant")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Semi-quantitative X-ray fluorescence spectrum processing", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Detect, quantify and annotate peaks in XRF spectra
    Analyze(analyze::AnalyzeArgs),

    /// Show the element reference table
    Elements(elements::ElementsArgs),

    /// Generate a synthetic XRF spectrum
    Generate(generate::GenerateArgs),
}
