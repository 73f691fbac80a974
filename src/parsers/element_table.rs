//! # 元素参考表解析器
//!
//! CSV 两列 `symbol,energy`（keV），行顺序即平局裁决顺序。
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs`, `commands/elements.rs` 使用
//! - 使用 `csv` + `serde` 反序列化
//! - 使用 `models/element.rs`

use crate::error::{Result, XrfError};
use crate::models::ElementTable;

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ElementRow {
    symbol: String,
    energy: f64,
}

/// 解析元素参考表文件
pub fn parse_element_table_file(path: &Path) -> Result<ElementTable> {
    let file = File::open(path).map_err(|e| XrfError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_element_table_reader(file)
}

/// 从字节流解析元素参考表
pub fn parse_element_table_reader<R: Read>(reader: R) -> Result<ElementTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for row in rdr.deserialize::<ElementRow>() {
        let row = row.map_err(|e| XrfError::MalformedInput(format!("element table: {}", e)))?;
        entries.push((row.symbol, row.energy));
    }

    ElementTable::new(entries)
}
