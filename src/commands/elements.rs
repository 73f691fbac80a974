//! # elements 命令实现
//!
//! 以表格形式打印元素参考表；给出能量时打印最近元素。
//!
//! ## 依赖关系
//! - 使用 `cli/elements.rs` 定义的参数
//! - 使用 `xrf/annotate.rs` 做最近邻查询

use crate::cli::elements::ElementsArgs;
use crate::error::Result;
use crate::utils::output;
use crate::xrf::annotate::ElementAnnotator;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ElementRow {
    #[tabled(rename = "#")]
    order: usize,
    #[tabled(rename = "Element")]
    symbol: String,
    #[tabled(rename = "Energy (keV)")]
    energy: String,
}

#[derive(Tabled)]
struct NearestRow {
    #[tabled(rename = "Query (keV)")]
    query: String,
    #[tabled(rename = "Element")]
    symbol: String,
    #[tabled(rename = "Reference (keV)")]
    reference: String,
    #[tabled(rename = "ΔE (keV)")]
    delta: String,
}

/// 执行 elements 命令
pub fn execute(args: ElementsArgs) -> Result<()> {
    let table = super::load_element_table(args.table.as_deref())?;

    if args.nearest.is_empty() {
        output::print_header(&format!("Element Reference Table ({} lines)", table.len()));
        let rows: Vec<ElementRow> = table
            .iter()
            .enumerate()
            .map(|(i, (symbol, energy))| ElementRow {
                order: i + 1,
                symbol: symbol.to_string(),
                energy: format!("{:.3}", energy),
            })
            .collect();
        println!("{}", Table::new(&rows));
        return Ok(());
    }

    let annotator = ElementAnnotator::new(&table);
    let rows: Vec<NearestRow> = args
        .nearest
        .iter()
        .map(|&e| {
            let (symbol, reference) = annotator.annotate(e);
            NearestRow {
                query: format!("{:.3}", e),
                symbol: symbol.to_string(),
                reference: format!("{:.3}", reference),
                delta: format!("{:+.3}", e - reference),
            }
        })
        .collect();

    output::print_header("Nearest Reference Lines");
    println!("{}", Table::new(&rows));
    Ok(())
}
