//! # XRF 数据导出
//!
//! 导出峰表与处理后能谱。
//!
//! ## 支持格式
//! - 峰表 CSV: index, energy, area, element, reference_energy
//! - 能谱 CSV: energy, counts（扣本底时附加 background 列）
//! - 能谱 XY: `#` 注释头 + 制表符分隔两列
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs`, `commands/generate.rs` 调用
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{Result, XrfError};
use crate::models::{AnnotatedPeak, Spectrum};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// 写入峰表 CSV
pub fn write_peaks_csv<W: Write>(peaks: &[AnnotatedPeak], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["index", "energy", "area", "element", "reference_energy"])?;

    for peak in peaks {
        wtr.write_record(&[
            peak.index.to_string(),
            format!("{:.4}", peak.energy),
            format!("{:.4}", peak.area),
            peak.element.clone(),
            format!("{:.4}", peak.reference_energy),
        ])?;
    }

    wtr.flush().map_err(|e| XrfError::CsvError(e.into()))?;
    Ok(())
}

/// 写入能谱 CSV
pub fn write_spectrum_csv<W: Write>(
    spectrum: &Spectrum,
    background: Option<&[f64]>,
    writer: W,
) -> Result<()> {
    if let Some(bg) = background {
        if bg.len() != spectrum.len() {
            return Err(XrfError::InvalidParameter(format!(
                "background has {} values but spectrum '{}' has {} points",
                bg.len(),
                spectrum.name(),
                spectrum.len()
            )));
        }
    }

    let mut wtr = csv::Writer::from_writer(writer);

    match background {
        Some(bg) => {
            wtr.write_record(["energy", "counts", "background"])?;
            for ((energy, counts), b) in spectrum.points().zip(bg) {
                wtr.write_record(&[
                    format!("{:.6}", energy),
                    format!("{:.6}", counts),
                    format!("{:.6}", b),
                ])?;
            }
        }
        None => {
            wtr.write_record(["energy", "counts"])?;
            for (energy, counts) in spectrum.points() {
                wtr.write_record(&[format!("{:.6}", energy), format!("{:.6}", counts)])?;
            }
        }
    }

    wtr.flush().map_err(|e| XrfError::CsvError(e.into()))?;
    Ok(())
}

/// 写入能谱 XY
pub fn write_spectrum_xy<W: Write>(spectrum: &Spectrum, mut writer: W) -> io::Result<()> {
    writeln!(writer, "# XRF Spectrum: {}", spectrum.name())?;
    writeln!(writer, "# Points: {}", spectrum.len())?;
    writeln!(writer, "# Columns: energy (keV), counts")?;
    writeln!(writer, "#")?;

    for (energy, counts) in spectrum.points() {
        writeln!(writer, "{:.6}\t{:.6}", energy, counts)?;
    }

    writer.flush()
}

/// 导出峰表为 CSV 文件
pub fn peaks_to_csv(peaks: &[AnnotatedPeak], output_path: &Path) -> Result<()> {
    write_peaks_csv(peaks, create_file(output_path)?)
}

/// 导出能谱为 CSV 文件
pub fn spectrum_to_csv(
    spectrum: &Spectrum,
    background: Option<&[f64]>,
    output_path: &Path,
) -> Result<()> {
    write_spectrum_csv(spectrum, background, create_file(output_path)?)
}

/// 导出能谱为 XY 文件
pub fn spectrum_to_xy(spectrum: &Spectrum, output_path: &Path) -> Result<()> {
    write_spectrum_xy(spectrum, create_file(output_path)?).map_err(|e| {
        XrfError::FileWriteError {
            path: output_path.display().to_string(),
            source: e,
        }
    })
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| XrfError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::ElementTable;
    use crate::parsers::spectrum::{parse_csv_reader, parse_xy_content};
    use crate::xrf::pipeline::{self, PipelineConfig};
    use crate::xrf::synthetic::SyntheticSpectrum;

    fn sample() -> Spectrum {
        Spectrum::new("sample", vec![1.0, 1.5, 2.0], vec![10.0, 30.0, 12.5]).unwrap()
    }

    #[test]
    fn test_peaks_csv_layout() {
        let peaks = vec![AnnotatedPeak {
            index: 1,
            energy: 6.4,
            area: 123.0,
            element: "Fe".to_string(),
            reference_energy: 6.404,
        }];
        let mut buf = Vec::new();
        write_peaks_csv(&peaks, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("index,energy,area,element,reference_energy")
        );
        assert_eq!(lines.next(), Some("1,6.4000,123.0000,Fe,6.4040"));
    }

    #[test]
    fn test_spectrum_csv_can_be_read_back() {
        let s = sample();
        let mut buf = Vec::new();
        write_spectrum_csv(&s, Some(&[1.0, 2.0, 3.0]), &mut buf).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("energy,counts,background"));

        let parsed = parse_csv_reader(buf.as_slice(), "sample").unwrap();
        assert_eq!(parsed, s);
    }

    #[test]
    fn test_background_length_mismatch_rejected() {
        let mut buf = Vec::new();
        let err = write_spectrum_csv(&sample(), Some(&[0.5]), &mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_subtracted_spectrum_csv_carries_background() {
        let s = SyntheticSpectrum::new(0.0, 10.0, 101)
            .with_continuum(40.0, 3.0, 0.0)
            .with_line(6.404, 300.0, 0.1)
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

        let mut buf = Vec::new();
        write_spectrum_csv(&result.spectrum, result.background.as_deref(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("energy,counts,background"));
        let rows: Vec<Vec<f64>> = lines
            .map(|l| l.split(',').map(|v| v.parse().unwrap()).collect())
            .collect();
        assert_eq!(rows.len(), 101);
        // counts + background 还原原始计数
        for (row, orig) in rows.iter().zip(s.counts()) {
            assert_eq!(row.len(), 3);
            assert!((row[1] + row[2] - orig).abs() < 1e-4);
        }
        // 线性连续谱: 10 keV 处本底为 40 + 30
        assert!((rows[100][2] - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_spectrum_xy_can_be_read_back() {
        let s = sample();
        let mut buf = Vec::new();
        write_spectrum_xy(&s, &mut buf).unwrap();
        let parsed = parse_xy_content(&String::from_utf8(buf).unwrap(), "sample").unwrap();
        assert_eq!(parsed, s);
    }
}
