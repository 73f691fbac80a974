//! # 元素特征能量参考表
//!
//! 元素符号到特征 X 射线能量 (keV) 的有序映射。
//! 顺序即平局裁决顺序，因此使用有序列表而非哈希表。
//!
//! ## 数据来源
//! X-ray Data Booklet (LBNL), Table 1-2, Kα1 / Lα1 发射线
//!
//! ## 依赖关系
//! - 被 `xrf/annotate.rs` 使用
//! - 被 `parsers/element_table.rs` 构造
//! - 纯静态数据，无外部依赖

use crate::error::{Result, XrfError};

/// 内置发射线表（符号, 能量 keV）
///
/// 轻元素至 Sn 使用 Kα1，重元素使用 Lα1。
pub const DEFAULT_EMISSION_LINES: &[(&str, f64)] = &[
    ("Al", 1.487),
    ("Si", 1.740),
    ("P", 2.014),
    ("S", 2.308),
    ("Cl", 2.622),
    ("K", 3.314),
    ("Ca", 3.692),
    ("Ti", 4.511),
    ("V", 4.952),
    ("Cr", 5.415),
    ("Mn", 5.899),
    ("Fe", 6.404),
    ("Co", 6.930),
    ("Ni", 7.478),
    ("Cu", 8.048),
    ("Zn", 8.639),
    ("Ga", 9.252),
    ("Au", 9.713),
    ("Hg", 9.989),
    ("As", 10.544),
    ("Pb", 10.551),
    ("Se", 11.222),
    ("Br", 11.924),
    ("Rb", 13.395),
    ("Sr", 14.165),
    ("Zr", 15.775),
    ("Mo", 17.479),
    ("Ag", 22.163),
    ("Cd", 23.174),
    ("Sn", 25.271),
];

/// 元素参考表
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTable {
    entries: Vec<(String, f64)>,
}

impl ElementTable {
    /// 从有序条目创建参考表，表不能为空，能量必须有限
    pub fn new(entries: Vec<(String, f64)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(XrfError::MalformedInput(
                "element table contains no entries".to_string(),
            ));
        }
        if let Some((symbol, energy)) = entries.iter().find(|(_, e)| !e.is_finite()) {
            return Err(XrfError::MalformedInput(format!(
                "element '{}' has non-finite energy {}",
                symbol, energy
            )));
        }
        Ok(ElementTable { entries })
    }

    /// 内置参考表
    pub fn builtin() -> Self {
        ElementTable {
            entries: DEFAULT_EMISSION_LINES
                .iter()
                .map(|(s, e)| (s.to_string(), *e))
                .collect(),
        }
    }

    /// 按定义顺序遍历条目
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(s, e)| (s.as_str(), *e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 查询元素能量
    pub fn energy_of(&self, symbol: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(symbol))
            .map(|(_, e)| *e)
    }
}

impl Default for ElementTable {
    fn default() -> Self {
        ElementTable::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let table = ElementTable::builtin();
        assert_eq!(table.len(), DEFAULT_EMISSION_LINES.len());
        assert!((table.energy_of("Fe").unwrap() - 6.404).abs() < 1e-9);
        assert!((table.energy_of("cu").unwrap() - 8.048).abs() < 1e-9);
        assert!(table.energy_of("Xx").is_none());
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(ElementTable::new(vec![]).is_err());
        assert!(ElementTable::new(vec![("Fe".to_string(), f64::NAN)]).is_err());
    }
}
