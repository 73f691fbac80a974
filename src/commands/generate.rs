//! # generate 命令实现
//!
//! 生成合成 XRF 能谱并写入 CSV 或 XY 文件。
//!
//! ## 依赖关系
//! - 使用 `cli/generate.rs` 定义的参数
//! - 使用 `xrf/synthetic.rs` 与 `xrf/export.rs`

use crate::cli::generate::GenerateArgs;
use crate::error::{Result, XrfError};
use crate::utils::output;
use crate::xrf::export;
use crate::xrf::synthetic::SyntheticSpectrum;

use log::debug;

/// 执行 generate 命令
pub fn execute(args: GenerateArgs) -> Result<()> {
    output::print_header("Synthetic XRF Spectrum");

    if args.output.exists() && !args.overwrite {
        output::print_warning(&format!(
            "Output exists, use --overwrite to replace: {}",
            args.output.display()
        ));
        return Ok(());
    }

    let table = super::load_element_table(args.table.as_deref())?;
    let (e_min, e_max) = parse_energy_range(&args.range)?;

    let mut builder = SyntheticSpectrum::new(e_min, e_max, args.points).with_continuum(
        args.continuum_offset,
        args.continuum_slope,
        args.continuum_curvature,
    );

    for symbol in &args.elements {
        let energy = table.energy_of(symbol).ok_or_else(|| {
            XrfError::InvalidParameter(format!("element '{}' is not in the reference table", symbol))
        })?;
        debug!("adding {} line at {:.3} keV", symbol, energy);
        builder = builder.with_line(energy, args.amplitude, args.line_width);
    }

    if args.noise > 0.0 {
        builder = builder.with_noise(args.noise, args.seed);
    }

    let name = args
        .output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("synthetic");
    let spectrum = builder.build(name)?;

    let is_xy = matches!(
        args.output
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref(),
        Some("xy") | Some("dat") | Some("txt")
    );
    if is_xy {
        export::spectrum_to_xy(&spectrum, &args.output)?;
    } else {
        export::spectrum_to_csv(&spectrum, None, &args.output)?;
    }

    output::print_success(&format!(
        "{} channels, {:.2}-{:.2} keV, lines: {} -> '{}'",
        spectrum.len(),
        e_min,
        e_max,
        args.elements.join(", "),
        args.output.display()
    ));

    Ok(())
}

/// 解析能量范围 (e.g., "0-20")
fn parse_energy_range(range: &str) -> Result<(f64, f64)> {
    let (min, max) = range
        .split_once('-')
        .ok_or_else(|| XrfError::InvalidRange(range.to_string()))?;

    let min: f64 = min
        .trim()
        .parse()
        .map_err(|_| XrfError::InvalidRange(range.to_string()))?;
    let max: f64 = max
        .trim()
        .parse()
        .map_err(|_| XrfError::InvalidRange(range.to_string()))?;

    if min < 0.0 || max <= min {
        return Err(XrfError::InvalidRange(format!(
            "{} (must be 0 <= min < max)",
            range
        )));
    }

    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_energy_range() {
        assert_eq!(parse_energy_range("0-20").unwrap(), (0.0, 20.0));
        assert_eq!(parse_energy_range("1.5 - 12").unwrap(), (1.5, 12.0));
        assert!(parse_energy_range("20-10").is_err());
        assert!(parse_energy_range("20").is_err());
    }
}
