//! # 数据模型模块
//!
//! 定义能谱、峰和元素参考表的统一数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `xrf/` 和 `commands/` 使用
//! - 子模块: spectrum, peak, element

pub mod element;
pub mod peak;
pub mod spectrum;

pub use element::ElementTable;
pub use peak::{AnnotatedPeak, QuantifiedPeak};
pub use spectrum::Spectrum;
