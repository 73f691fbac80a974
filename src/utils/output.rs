//! # 美化输出工具
//!
//! 提供统一的终端输出样式。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块与 `main.rs` 使用
//! - 使用 `colored` crate

use crate::error::{ErrorKind, XrfError};

use colored::Colorize;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印键值对（配置摘要）
pub fn print_setting(key: &str, value: &str) {
    println!("    {:<24} {}", key.dimmed(), value);
}

/// 打印流程错误：失败阶段、错误种类与详情
pub fn print_pipeline_error(err: &XrfError) {
    let kind = match err.kind() {
        ErrorKind::InvalidParameter => "invalid parameter",
        ErrorKind::InsufficientData => "insufficient data",
        ErrorKind::MalformedInput => "malformed input",
        ErrorKind::Io => "i/o",
        ErrorKind::Other => "error",
    };
    let stage = err
        .stage()
        .map(|s| format!("[{}] ", s))
        .unwrap_or_default();
    eprintln!(
        "{} {}{} {}",
        "[ERR]".red().bold(),
        stage.cyan(),
        kind.red(),
        err
    );
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
