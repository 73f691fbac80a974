//! # 能谱文件解析器
//!
//! ## CSV 格式
//! 表头至少包含 `energy` 与 `counts` 两列（大小写不敏感，多余列忽略），
//! 行顺序即下标顺序：
//! ```text
//! energy,counts
//! 0.00,12
//! 0.05,15
//! ...
//! ```
//!
//! ## XY 格式
//! 空白分隔的两列数值，`#` 开头为注释。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `csv` 库读取表格
//! - 使用 `models/spectrum.rs`

use crate::error::{Result, XrfError};
use crate::models::Spectrum;

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// 解析 CSV 能谱文件
pub fn parse_csv_file(path: &Path) -> Result<Spectrum> {
    let file = File::open(path).map_err(|e| XrfError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_csv_reader(file, &spectrum_name(path))
}

/// 从任意字节流解析 CSV 能谱
pub fn parse_csv_reader<R: Read>(reader: R, name: &str) -> Result<Spectrum> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |wanted: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                XrfError::MalformedInput(format!(
                    "spectrum '{}' is missing required column '{}'",
                    name, wanted
                ))
            })
    };
    let energy_col = column("energy")?;
    let counts_col = column("counts")?;

    let mut energy = Vec::new();
    let mut counts = Vec::new();

    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        // 表头占第 1 行
        let line = i + 2;
        energy.push(parse_field(record.get(energy_col), "energy", line, name)?);
        counts.push(parse_field(record.get(counts_col), "counts", line, name)?);
    }

    Spectrum::new(name, energy, counts)
}

/// 解析 XY 能谱文件
pub fn parse_xy_file(path: &Path) -> Result<Spectrum> {
    let content = fs::read_to_string(path).map_err(|e| XrfError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_xy_content(&content, &spectrum_name(path))
}

/// 从字符串内容解析 XY 能谱
pub fn parse_xy_content(content: &str, name: &str) -> Result<Spectrum> {
    let mut energy = Vec::new();
    let mut counts = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line_no = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty());
        energy.push(parse_field(parts.next(), "energy", line_no, name)?);
        counts.push(parse_field(parts.next(), "counts", line_no, name)?);
    }

    Spectrum::new(name, energy, counts)
}

fn parse_field(value: Option<&str>, column: &str, line: usize, name: &str) -> Result<f64> {
    let value = value.filter(|v| !v.is_empty()).ok_or_else(|| {
        XrfError::MalformedInput(format!(
            "spectrum '{}' line {}: missing {} value",
            name, line, column
        ))
    })?;
    value.parse::<f64>().map_err(|_| {
        XrfError::MalformedInput(format!(
            "spectrum '{}' line {}: invalid {} value '{}'",
            name, line, column, value
        ))
    })
}

fn spectrum_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}
