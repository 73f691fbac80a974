//! # elements 子命令 CLI 定义
//!
//! 显示元素参考表，或查询某一能量最近的元素。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/elements.rs`

use clap::Args;
use std::path::PathBuf;

/// elements 子命令参数
#[derive(Args, Debug)]
pub struct ElementsArgs {
    /// Element table CSV (columns: symbol,energy); built-in table if omitted
    #[arg(long, env = "XRF_ELEMENT_TABLE")]
    pub table: Option<PathBuf>,

    /// Look up the nearest element for these energies (keV)
    #[arg(long, value_delimiter = ',')]
    pub nearest: Vec<f64>,
}
