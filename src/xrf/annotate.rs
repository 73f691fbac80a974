//! # 元素标注
//!
//! 按绝对能量差将峰位映射到参考表中最近的元素。
//! 平局取参考表中先出现者；不设置距离上限，总是返回一个匹配。
//!
//! ## 依赖关系
//! - 被 `xrf/pipeline.rs` 调用
//! - 使用 `models/element.rs` 的 ElementTable

use crate::models::{AnnotatedPeak, ElementTable, QuantifiedPeak};

/// 元素标注器
#[derive(Debug, Clone, Copy)]
pub struct ElementAnnotator<'a> {
    table: &'a ElementTable,
}

impl<'a> ElementAnnotator<'a> {
    pub fn new(table: &'a ElementTable) -> Self {
        ElementAnnotator { table }
    }

    /// 最近元素 (符号, 参考能量)
    pub fn annotate(&self, energy: f64) -> (&'a str, f64) {
        let table: &'a ElementTable = self.table;
        let mut entries = table.iter();
        // ElementTable 保证非空
        let mut best = entries.next().unwrap_or(("", f64::NAN));
        let mut best_distance = (energy - best.1).abs();

        for (symbol, reference) in entries {
            let distance = (energy - reference).abs();
            if distance < best_distance {
                best = (symbol, reference);
                best_distance = distance;
            }
        }
        best
    }

    /// 为定量峰附加元素信息
    pub fn annotate_peaks(&self, peaks: &[QuantifiedPeak]) -> Vec<AnnotatedPeak> {
        peaks
            .iter()
            .map(|p| {
                let (symbol, reference_energy) = self.annotate(p.energy);
                AnnotatedPeak {
                    index: p.index,
                    energy: p.energy,
                    area: p.area,
                    element: symbol.to_string(),
                    reference_energy,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, f64)]) -> ElementTable {
        ElementTable::new(entries.iter().map(|(s, e)| (s.to_string(), *e)).collect()).unwrap()
    }

    #[test]
    fn test_nearest_element() {
        let t = table(&[("Cu", 8.0), ("Fe", 6.4), ("Zn", 9.6)]);
        let a = ElementAnnotator::new(&t);
        assert_eq!(a.annotate(8.2), ("Cu", 8.0));
        assert_eq!(a.annotate(6.0).0, "Fe");
        assert_eq!(a.annotate(100.0).0, "Zn");
    }

    #[test]
    fn test_tie_prefers_first_entry() {
        let t = table(&[("B", 2.0), ("A", 4.0)]);
        assert_eq!(ElementAnnotator::new(&t).annotate(3.0).0, "B");

        let t = table(&[("A", 4.0), ("B", 2.0)]);
        assert_eq!(ElementAnnotator::new(&t).annotate(3.0).0, "A");
    }

    #[test]
    fn test_duplicate_energies_stay_separate_peaks() {
        let t = ElementTable::builtin();
        let peaks = vec![
            QuantifiedPeak {
                index: 3,
                energy: 6.4,
                area: 10.0,
            },
            QuantifiedPeak {
                index: 4,
                energy: 6.4,
                area: 12.0,
            },
        ];
        let annotated = ElementAnnotator::new(&t).annotate_peaks(&peaks);
        assert_eq!(annotated.len(), 2);
        assert!(annotated.iter().all(|p| p.element == "Fe"));
        assert_eq!(annotated[1].area, 12.0);
        assert!((annotated[0].energy_offset() + 0.004).abs() < 1e-9);
    }
}
