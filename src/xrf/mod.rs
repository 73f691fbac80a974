//! # XRF 能谱处理模块
//!
//! 半定量 X 射线荧光分析的核心处理流程。
//!
//! ## 子模块
//! - `polyfit`: 多项式最小二乘拟合内核
//! - `smoothing`: Savitzky-Golay 平滑
//! - `adjust`: 噪声 / 缩放 / 平滑调整
//! - `background`: 本底拟合与扣除
//! - `peaks`: 峰检测（阈值 / 突出度）
//! - `quantify`: 峰面积定量
//! - `annotate`: 元素标注
//! - `pipeline`: 流程编排
//! - `synthetic`: 合成能谱
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/` 数据模型

pub mod adjust;
pub mod annotate;
pub mod background;
pub mod export;
pub mod peaks;
pub mod pipeline;
pub mod plot;
pub mod polyfit;
pub mod quantify;
pub mod smoothing;
pub mod synthetic;

pub use peaks::DetectionMethod;
pub use pipeline::{PipelineConfig, PipelineOutput};
