//! # 峰数据模型
//!
//! 峰的身份由下标决定，面积与元素归属作为并列字段保存，
//! 避免能量重复时以能量为键发生覆盖。
//!
//! ## 依赖关系
//! - 被 `xrf/quantify.rs`, `xrf/annotate.rs`, `xrf/export.rs` 使用

use serde::{Deserialize, Serialize};

/// 已定量的峰
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantifiedPeak {
    /// 峰位下标
    pub index: usize,
    /// 峰位能量 (keV)
    pub energy: f64,
    /// 窗口积分面积（未归一化）
    pub area: f64,
}

/// 已标注元素的峰
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedPeak {
    pub index: usize,
    pub energy: f64,
    pub area: f64,
    /// 最近元素符号
    pub element: String,
    /// 该元素的参考能量 (keV)
    pub reference_energy: f64,
}

impl AnnotatedPeak {
    /// 峰位与参考能量之差 (keV)
    pub fn energy_offset(&self) -> f64 {
        self.energy - self.reference_energy
    }
}
