//! # 批量处理模块
//!
//! 对目录中的多个能谱文件并行运行处理流程。
//!
//! ## 功能
//! - 按 glob 模式收集能谱文件
//! - 并行处理（每个任务独立持有能谱、配置与随机源）
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchRunner, ProcessResult};
