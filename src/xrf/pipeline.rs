//! # 处理流程编排
//!
//! 按固定顺序组合各阶段：调整 → (可选) 扣本底 → 检峰 → 定量 → 标注。
//! 所有参数来自显式传入的不可变配置，编排器自身不持有状态。
//!
//! 任一阶段失败时整体失败，错误带上阶段名，错误种类保持可查询。
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 调用
//! - 使用 `xrf/` 下全部处理阶段

use crate::error::{PipelineStage, Result};
use crate::models::{AnnotatedPeak, ElementTable, Spectrum};
use crate::xrf::adjust::{self, AdjustParams};
use crate::xrf::annotate::ElementAnnotator;
use crate::xrf::background::{self, Region, DEFAULT_BACKGROUND_DEGREE};
use crate::xrf::peaks::{DetectionMethod, PeakDetector};
use crate::xrf::quantify::{PeakQuantifier, DEFAULT_HALF_WIDTH};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// 流程配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub detection_method: DetectionMethod,
    pub threshold: f64,
    /// 最小突出度（仅 prominence 策略）
    pub min_prominence: f64,
    pub noise_sigma: f64,
    pub height_multiplier: f64,
    pub smoothing_window: usize,
    pub use_background_subtraction: bool,
    pub background_regions: Vec<Region>,
    pub background_degree: usize,
    /// 定量窗口半宽
    pub quantify_half_width: usize,
    /// 噪声随机种子，None 时使用系统熵
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            detection_method: DetectionMethod::Threshold,
            threshold: 0.0,
            min_prominence: 0.0,
            noise_sigma: 0.0,
            height_multiplier: 1.0,
            smoothing_window: 1,
            use_background_subtraction: false,
            background_regions: Vec::new(),
            background_degree: DEFAULT_BACKGROUND_DEGREE,
            quantify_half_width: DEFAULT_HALF_WIDTH,
            seed: None,
        }
    }
}

impl PipelineConfig {
    fn adjust_params(&self) -> AdjustParams {
        AdjustParams {
            noise_sigma: self.noise_sigma,
            height_multiplier: self.height_multiplier,
            smoothing_window: self.smoothing_window,
        }
    }
}

/// 流程输出
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// 实际用于检峰的能谱（已调整、可能已扣本底）
    pub spectrum: Spectrum,
    /// 扣除的本底曲线（未扣本底时为 None）
    pub background: Option<Vec<f64>>,
    /// 已定量、已标注的峰
    pub peaks: Vec<AnnotatedPeak>,
}

/// 运行流程，随机源由配置中的种子决定
pub fn run(
    spectrum: &Spectrum,
    config: &PipelineConfig,
    table: &ElementTable,
) -> Result<PipelineOutput> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    run_with_rng(spectrum, config, table, &mut rng)
}

/// 使用外部随机源运行流程
pub fn run_with_rng<R: Rng + ?Sized>(
    spectrum: &Spectrum,
    config: &PipelineConfig,
    table: &ElementTable,
    rng: &mut R,
) -> Result<PipelineOutput> {
    debug!(
        "running pipeline on '{}' ({} samples) with {:?}",
        spectrum.name(),
        spectrum.len(),
        config
    );

    // 检测参数在任何阶段运行前校验
    let detector = PeakDetector::new(config.detection_method, config.threshold)
        .and_then(|d| d.with_min_prominence(config.min_prominence))
        .map_err(|e| e.in_stage(PipelineStage::Detect))?;

    let adjusted = adjust::adjust(spectrum, &config.adjust_params(), rng)
        .map_err(|e| e.in_stage(PipelineStage::Adjust))?;

    let (processed, background) = if config.use_background_subtraction {
        let (subtracted, model) = background::subtract_background(
            &adjusted,
            &config.background_regions,
            config.background_degree,
        )
        .map_err(|e| e.in_stage(PipelineStage::Background))?;
        debug!(
            "background: degree {} fitted from {} samples",
            model.degree(),
            model.sample_count()
        );
        let curve = model.curve(adjusted.energy());
        (subtracted, Some(curve))
    } else {
        (adjusted, None)
    };

    let indices = detector.detect(processed.counts());
    debug!(
        "{} detection found {} peaks",
        config.detection_method,
        indices.len()
    );

    let quantified = PeakQuantifier::new(config.quantify_half_width)
        .quantify(&processed, &indices)
        .map_err(|e| e.in_stage(PipelineStage::Quantify))?;

    let peaks = ElementAnnotator::new(table).annotate_peaks(&quantified);
    info!(
        "'{}': {} peaks annotated",
        processed.name(),
        peaks.len()
    );

    Ok(PipelineOutput {
        spectrum: processed,
        background,
        peaks,
    })
}
