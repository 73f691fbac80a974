//! # 统一错误处理模块
//!
//! 定义 xrfquant 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 领域错误: InvalidParameter / InsufficientData / MalformedInput
//! - 流水线阶段包装: Stage（标明失败阶段，保留内部错误种类）
//! - I/O 与外部协作者错误: 文件、CSV、绘图
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use std::fmt;
use thiserror::Error;

/// 流水线阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Adjust,
    Background,
    Detect,
    Quantify,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Adjust => write!(f, "adjust"),
            PipelineStage::Background => write!(f, "background"),
            PipelineStage::Detect => write!(f, "detect"),
            PipelineStage::Quantify => write!(f, "quantify"),
        }
    }
}

/// 领域错误种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidParameter,
    InsufficientData,
    MalformedInput,
    Io,
    Other,
}

/// xrfquant 统一错误类型
#[derive(Error, Debug)]
pub enum XrfError {
    // ─────────────────────────────────────────────────────────────
    // 领域错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: PipelineStage,
        #[source]
        source: Box<XrfError>,
    },

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    // ─────────────────────────────────────────────────────────────
    // 参数解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // CSV / 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot rendering failed: {0}")]
    PlotError(String),
}

impl XrfError {
    /// 包装为带阶段信息的错误
    pub fn in_stage(self, stage: PipelineStage) -> Self {
        XrfError::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// 错误种类（穿透阶段包装）
    pub fn kind(&self) -> ErrorKind {
        match self {
            XrfError::InvalidParameter(_) | XrfError::InvalidRange(_) => {
                ErrorKind::InvalidParameter
            }
            XrfError::InsufficientData(_) => ErrorKind::InsufficientData,
            XrfError::MalformedInput(_) | XrfError::CsvError(_) => ErrorKind::MalformedInput,
            XrfError::Stage { source, .. } => source.kind(),
            XrfError::FileReadError { .. }
            | XrfError::FileWriteError { .. }
            | XrfError::FileNotFound { .. } => ErrorKind::Io,
            XrfError::UnsupportedFormat(_) | XrfError::PlotError(_) => ErrorKind::Other,
        }
    }

    /// 失败阶段（若有）
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            XrfError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, XrfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_wrapper_keeps_kind() {
        let err = XrfError::InsufficientData("2 points for degree 3".to_string())
            .in_stage(PipelineStage::Background);

        assert_eq!(err.kind(), ErrorKind::InsufficientData);
        assert_eq!(err.stage(), Some(PipelineStage::Background));
        assert_eq!(
            err.to_string(),
            "background stage failed: Insufficient data: 2 points for degree 3"
        );
    }
}
