//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `xrf/`, `batch/`, `utils/`
//! - 子模块: analyze, elements, generate

pub mod analyze;
pub mod elements;
pub mod generate;

use crate::cli::Commands;
use crate::error::Result;
use crate::models::ElementTable;
use crate::parsers::element_table;
use crate::utils::output;

use std::path::Path;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Analyze(args) => analyze::execute(args),
        Commands::Elements(args) => elements::execute(args),
        Commands::Generate(args) => generate::execute(args),
    }
}

/// 加载元素参考表（未指定文件时使用内置表）
fn load_element_table(path: Option<&Path>) -> Result<ElementTable> {
    match path {
        Some(p) => {
            let table = element_table::parse_element_table_file(p)?;
            output::print_info(&format!(
                "Loaded {} reference lines from '{}'",
                table.len(),
                p.display()
            ));
            Ok(table)
        }
        None => Ok(ElementTable::builtin()),
    }
}
