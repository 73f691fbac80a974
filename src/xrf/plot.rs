//! # XRF 能谱图表生成
//!
//! 使用 `plotters` 库绘制处理后的能谱。
//!
//! ## 功能
//! - 能谱连续曲线与填充
//! - 可选本底曲线（扣本底前的基线）
//! - 峰位标记与元素标注
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 调用
//! - 使用 `xrf/pipeline.rs` 的 PipelineOutput
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, XrfError};
use crate::xrf::PipelineOutput;

use plotters::prelude::*;
use std::path::Path;

/// 绘图选项
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// 标注元素的峰数（按面积从大到小）
    pub label_count: usize,
    pub use_svg: bool,
}

/// 生成能谱图
pub fn generate_spectrum_plot(
    result: &PipelineOutput,
    output_path: &Path,
    options: &PlotOptions,
) -> Result<()> {
    let size = (options.width, options.height);
    if options.use_svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_spectrum_chart(&root, result, options)?;
        root.present()
            .map_err(|e| XrfError::PlotError(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_spectrum_chart(&root, result, options)?;
        root.present()
            .map_err(|e| XrfError::PlotError(e.to_string()))?;
    }
    Ok(())
}

/// 扣本底前的计数（处理后计数 + 本底），与本底曲线同一基线
fn pre_subtraction_counts(result: &PipelineOutput) -> Option<Vec<f64>> {
    result.background.as_ref().map(|bg| {
        result
            .spectrum
            .counts()
            .iter()
            .zip(bg)
            .map(|(c, b)| c + b)
            .collect()
    })
}

/// 绘制图表的核心逻辑
fn draw_spectrum_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    result: &PipelineOutput,
    options: &PlotOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| XrfError::PlotError(format!("{:?}", e)))?;

    let spectrum = &result.spectrum;
    let (mut x_min, mut x_max) = spectrum.energy_range();
    if x_max <= x_min {
        x_min -= 0.5;
        x_max += 0.5;
    }

    let raw = pre_subtraction_counts(result);

    // y 范围覆盖全部曲线
    let mut y_values: Vec<f64> = spectrum.counts().to_vec();
    if let (Some(bg), Some(raw)) = (&result.background, &raw) {
        y_values.extend(bg.iter().copied());
        y_values.extend(raw.iter().copied());
    }
    let y_low = y_values.iter().copied().fold(0.0_f64, f64::min);
    let y_high = y_values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let y_span = (y_high - y_low).max(1.0);
    let (y_min, y_max) = (y_low - 0.02 * y_span, y_high + 0.12 * y_span);

    let mut chart = ChartBuilder::on(root)
        .caption(&options.title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| XrfError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Energy (keV)")
        .y_desc("Counts")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| XrfError::PlotError(format!("{:?}", e)))?;

    let line_color = RGBColor(0, 102, 204);
    chart
        .draw_series(AreaSeries::new(
            spectrum.points(),
            0.0,
            line_color.mix(0.15),
        ))
        .map_err(|e| XrfError::PlotError(format!("{:?}", e)))?;
    chart
        .draw_series(LineSeries::new(
            spectrum.points(),
            line_color.stroke_width(2),
        ))
        .map_err(|e| XrfError::PlotError(format!("{:?}", e)))?
        .label(if raw.is_some() {
            "Background-subtracted"
        } else {
            "Spectrum"
        })
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color));

    if let (Some(bg), Some(raw)) = (&result.background, &raw) {
        let raw_color = RGBColor(120, 120, 120);
        chart
            .draw_series(LineSeries::new(
                spectrum.energy().iter().copied().zip(raw.iter().copied()),
                raw_color.stroke_width(1),
            ))
            .map_err(|e| XrfError::PlotError(format!("{:?}", e)))?
            .label("Before subtraction")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], raw_color));

        let bg_color = RGBColor(204, 102, 0);
        chart
            .draw_series(LineSeries::new(
                spectrum.energy().iter().copied().zip(bg.iter().copied()),
                bg_color.stroke_width(1),
            ))
            .map_err(|e| XrfError::PlotError(format!("{:?}", e)))?
            .label("Removed background")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], bg_color));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", 14))
            .draw()
            .map_err(|e| XrfError::PlotError(format!("{:?}", e)))?;
    }

    // 峰位标记
    let marker_color = RGBColor(200, 30, 30);
    chart
        .draw_series(result.peaks.iter().map(|p| {
            Circle::new(
                (p.energy, spectrum.counts()[p.index]),
                4,
                marker_color.filled(),
            )
        }))
        .map_err(|e| XrfError::PlotError(format!("{:?}", e)))?;

    // 面积最大的若干峰标注元素
    let mut ranked: Vec<_> = result.peaks.iter().collect();
    ranked.sort_by(|a, b| {
        b.area
            .partial_cmp(&a.area)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let label_offset = 0.03 * y_span;
    for peak in ranked.into_iter().take(options.label_count) {
        let text_style = ("sans-serif", 13).into_font().color(&BLACK);
        chart
            .draw_series(std::iter::once(Text::new(
                peak.element.clone(),
                (peak.energy, spectrum.counts()[peak.index] + label_offset),
                text_style,
            )))
            .map_err(|e| XrfError::PlotError(format!("{:?}", e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ElementTable;
    use crate::xrf::pipeline::{self, PipelineConfig};
    use crate::xrf::synthetic::SyntheticSpectrum;

    #[test]
    fn test_pre_subtraction_curve_shares_background_baseline() {
        let s = SyntheticSpectrum::new(0.0, 10.0, 101)
            .with_continuum(30.0, 5.0, 0.0)
            .with_line(6.404, 250.0, 0.1)
            .build("fe")
            .unwrap();
        let config = PipelineConfig {
            threshold: 50.0,
            use_background_subtraction: true,
            background_regions: vec![(0, 50), (80, 101)],
            background_degree: 1,
            ..PipelineConfig::default()
        };
        let result = pipeline::run(&s, &config, &ElementTable::builtin()).unwrap();

        let raw = pre_subtraction_counts(&result).unwrap();
        for (r, orig) in raw.iter().zip(s.counts()) {
            assert!((r - orig).abs() < 1e-9);
        }

        let plain = pipeline::run(&s, &PipelineConfig::default(), &ElementTable::builtin()).unwrap();
        assert!(pre_subtraction_counts(&plain).is_none());
    }
}
