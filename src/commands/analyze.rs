//! # analyze 命令实现
//!
//! 从能谱文件检出、定量并标注发射峰。
//!
//! ## 功能
//! - 支持单文件和批量目录处理
//! - 并行计算（rayon），每个文件独立运行流程
//! - 输出图像 (PNG/SVG)、峰表 (CSV) 或处理后能谱 (XY)
//! - 终端打印峰表
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 定义的 AnalyzeArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `xrf/` 模块进行计算
//! - 使用 `parsers/` 读取能谱与元素表

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::analyze::{parse_regions, AnalyzeArgs, AnalyzeOutputFormat};
use crate::error::{Result, XrfError};
use crate::models::{AnnotatedPeak, ElementTable};
use crate::parsers;
use crate::utils::output;
use crate::xrf::plot::{self, PlotOptions};
use crate::xrf::{export, pipeline, PipelineConfig, PipelineOutput};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 执行 analyze 命令
pub fn execute(args: AnalyzeArgs) -> Result<()> {
    output::print_header("XRF Peak Analysis");

    let config = build_config(&args)?;
    let table = super::load_element_table(args.elements.as_deref())?;
    print_config(&config);

    if args.input.is_file() {
        execute_single_file(&args, &config, &table)
    } else if args.input.is_dir() {
        execute_batch(&args, config, table)
    } else {
        Err(XrfError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 由命令行参数构造不可变流程配置
fn build_config(args: &AnalyzeArgs) -> Result<PipelineConfig> {
    let background_regions = parse_regions(&args.regions)?;
    if args.subtract_background && background_regions.is_empty() {
        return Err(XrfError::InvalidParameter(
            "--subtract-background requires --regions (e.g., \"0-40,200-256\")".to_string(),
        ));
    }

    Ok(PipelineConfig {
        detection_method: args.method,
        threshold: args.threshold,
        min_prominence: args.min_prominence,
        noise_sigma: args.noise_sigma,
        height_multiplier: args.height_multiplier,
        smoothing_window: args.smoothing_window,
        use_background_subtraction: args.subtract_background,
        background_regions,
        background_degree: args.degree,
        quantify_half_width: args.half_width,
        seed: args.seed,
    })
}

/// 打印配置摘要
fn print_config(config: &PipelineConfig) {
    output::print_info("Pipeline configuration:");
    output::print_setting("detection", &config.detection_method.to_string());
    output::print_setting("threshold", &format!("{}", config.threshold));
    if config.min_prominence > 0.0 {
        output::print_setting("min prominence", &format!("{}", config.min_prominence));
    }
    output::print_setting("noise sigma", &format!("{}", config.noise_sigma));
    output::print_setting("height multiplier", &format!("{}", config.height_multiplier));
    output::print_setting("smoothing window", &config.smoothing_window.to_string());
    if config.use_background_subtraction {
        let regions = config
            .background_regions
            .iter()
            .map(|(s, e)| format!("[{}, {})", s, e))
            .collect::<Vec<_>>()
            .join(" ");
        output::print_setting(
            "background",
            &format!("degree {} on {}", config.background_degree, regions),
        );
    }
    if let Some(seed) = config.seed {
        output::print_setting("seed", &seed.to_string());
    }
}

/// 单文件模式
fn execute_single_file(
    args: &AnalyzeArgs,
    config: &PipelineConfig,
    table: &ElementTable,
) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", args.input.display()));

    let spectrum = parsers::parse_spectrum_file(&args.input)?;
    output::print_success(&format!(
        "Loaded spectrum: {} ({} channels, {:.3}-{:.3} keV)",
        spectrum.name(),
        spectrum.len(),
        spectrum.energy_range().0,
        spectrum.energy_range().1
    ));

    let result = pipeline::run(&spectrum, config, table)?;
    output::print_success(&format!("Detected {} peaks", result.peaks.len()));

    let format = args
        .format
        .unwrap_or_else(|| guess_format_from_extension(&args.output));
    let title = args
        .title
        .clone()
        .unwrap_or_else(|| spectrum.name().to_string());
    write_output(&result, &args.output, format, &plot_options(args, title, format))?;

    print_peak_table(&result.peaks);
    output::print_success(&format!("Result saved to '{}'", args.output.display()));
    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &AnalyzeArgs, config: PipelineConfig, table: ElementTable) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} spectrum files", files.len()));

    fs::create_dir_all(&args.output).map_err(|e| XrfError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let format = args.format.unwrap_or(AnalyzeOutputFormat::Csv);
    output::print_info(&format!("Output format: {:?}", format));

    // 共享只读配置与元素表
    let shared = Arc::new(BatchAnalyzeConfig {
        output_dir: args.output.clone(),
        pipeline: config,
        table,
        format,
        plot: plot_options(args, String::new(), format),
        overwrite: args.overwrite,
    });

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} parallel jobs", runner.jobs()));
    let result = runner.run(files, |_, file| process_batch_file(file, &shared))?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} files, {} success, {} skipped, {} failed ({} peaks total)",
        result.total(),
        result.success,
        result.skipped,
        result.failed,
        result.total_peaks
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 批量处理配置
struct BatchAnalyzeConfig {
    output_dir: PathBuf,
    pipeline: PipelineConfig,
    table: ElementTable,
    format: AnalyzeOutputFormat,
    plot: PlotOptions,
    overwrite: bool,
}

/// 处理批量模式中的单个文件
fn process_batch_file(input: &Path, config: &BatchAnalyzeConfig) -> ProcessResult {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_file = config
        .output_dir
        .join(format!(
            "{}_{}.{}",
            stem,
            config.format.file_suffix(),
            config.format.extension()
        ));

    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    let run = || -> Result<usize> {
        let spectrum = parsers::parse_spectrum_file(input)?;
        let result = pipeline::run(&spectrum, &config.pipeline, &config.table)?;
        let options = PlotOptions {
            title: spectrum.name().to_string(),
            ..config.plot.clone()
        };
        write_output(&result, &output_file, config.format, &options)?;
        Ok(result.peaks.len())
    };

    match run() {
        Ok(peaks) => ProcessResult::Success {
            message: format!("{} -> {}", input.display(), output_file.display()),
            peaks,
        },
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

fn plot_options(args: &AnalyzeArgs, title: String, format: AnalyzeOutputFormat) -> PlotOptions {
    PlotOptions {
        title,
        width: args.width,
        height: args.height,
        label_count: args.label_count,
        use_svg: format == AnalyzeOutputFormat::Svg,
    }
}

/// 按格式写出结果
fn write_output(
    result: &PipelineOutput,
    output: &Path,
    format: AnalyzeOutputFormat,
    options: &PlotOptions,
) -> Result<()> {
    match format {
        AnalyzeOutputFormat::Png | AnalyzeOutputFormat::Svg => {
            plot::generate_spectrum_plot(result, output, options)
        }
        AnalyzeOutputFormat::Csv => export::peaks_to_csv(&result.peaks, output),
        AnalyzeOutputFormat::Xy => export::spectrum_to_xy(&result.spectrum, output),
        AnalyzeOutputFormat::SpectrumCsv => {
            export::spectrum_to_csv(&result.spectrum, result.background.as_deref(), output)
        }
    }
}

/// 从文件扩展名推断输出格式
fn guess_format_from_extension(path: &Path) -> AnalyzeOutputFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("svg") => AnalyzeOutputFormat::Svg,
        Some("csv") => AnalyzeOutputFormat::Csv,
        Some("xy") | Some("dat") | Some("txt") => AnalyzeOutputFormat::Xy,
        _ => AnalyzeOutputFormat::Png,
    }
}

/// 打印峰表
fn print_peak_table(peaks: &[AnnotatedPeak]) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct PeakRow {
        #[tabled(rename = "Index")]
        index: usize,
        #[tabled(rename = "Energy (keV)")]
        energy: String,
        #[tabled(rename = "Area (counts)")]
        area: String,
        #[tabled(rename = "Element")]
        element: String,
        #[tabled(rename = "ΔE (keV)")]
        offset: String,
    }

    let rows: Vec<PeakRow> = peaks
        .iter()
        .map(|p| PeakRow {
            index: p.index,
            energy: format!("{:.3}", p.energy),
            area: format!("{:.1}", p.area),
            element: p.element.clone(),
            offset: format!("{:+.3}", p.energy_offset()),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("{} Annotated Peaks", rows.len()));
        println!("{}", Table::new(&rows));
    }
}
