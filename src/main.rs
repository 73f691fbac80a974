//! # xrfquant - 半定量 XRF 能谱处理工具
//!
//! 在没有标样的情况下，对 X 射线荧光能谱做检峰、扣本底、
//! 峰面积定量与元素标注，给出相对（未校准）的元素强度。
//!
//! ## 子命令
//! - `analyze`  - 运行处理流程（单文件或批量目录）
//! - `elements` - 查看元素参考表 / 最近元素查询
//! - `generate` - 生成合成 XRF 能谱
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (能谱与元素表解析)
//!   │     ├── xrf/       (处理流程: 调整/本底/检峰/定量/标注)
//!   │     ├── batch/     (批量并行处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;
mod xrf;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_pipeline_error(&e);
        std::process::exit(1);
    }
}
