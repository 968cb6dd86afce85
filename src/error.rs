//! # 统一错误处理模块
//!
//! 定义 dashmerge 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// dashmerge 统一错误类型
#[derive(Error, Debug)]
pub enum DashmergeError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("FFmpeg not found: {path}\nPass --ffmpeg <PATH> or install ffmpeg on PATH")]
    ToolNotFound { path: String },

    #[error("Invalid channel pattern: {0}")]
    InvalidChannelSpec(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to launch {command}: {source}")]
    ToolLaunchError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("External command failed: {command}\n{status}\n{stderr}")]
    ToolFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 作业汇总错误
    // ─────────────────────────────────────────────────────────────
    #[error("{failed} of {total} merge jobs failed")]
    JobsFailed { failed: usize, total: usize },

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, DashmergeError>;
