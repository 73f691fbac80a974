//! # 解析器模块
//!
//! 提供能谱文件与元素参考表的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: spectrum, element_table

pub mod element_table;
pub mod spectrum;

use crate::error::{Result, XrfError};
use crate::models::Spectrum;
use std::path::Path;

/// 从文件路径推断格式并解析能谱
pub fn parse_spectrum_file(path: &Path) -> Result<Spectrum> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => spectrum::parse_csv_file(path),
        "xy" | "dat" | "txt" => spectrum::parse_xy_file(path),
        _ => Err(XrfError::UnsupportedFormat(format!(
            "Cannot determine spectrum format for: {}",
            path.display()
        ))),
    }
}
