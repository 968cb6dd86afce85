//! # merge 子命令 CLI 定义
//!
//! 按日期/通道分组行车记录仪片段并逐批调用 ffmpeg 合并。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/merge.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 输出命名方案
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum NamingMode {
    /// Name outputs after the channel label of each batch
    Channel,
    /// Reproduce the historical naming (index-based FR/RE, blank past two batches)
    Legacy,
}

impl std::fmt::Display for NamingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NamingMode::Channel => write!(f, "channel"),
            NamingMode::Legacy => write!(f, "legacy"),
        }
    }
}

/// 作业失败策略
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FailureMode {
    /// Record the failure and keep merging the remaining batches
    Continue,
    /// Stop at the first failed batch
    Abort,
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureMode::Continue => write!(f, "continue"),
            FailureMode::Abort => write!(f, "abort"),
        }
    }
}

/// merge 子命令参数
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input directory containing dashcam clips
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for merged videos
    #[arg(short, long)]
    pub output: PathBuf,

    /// Path to the ffmpeg executable (searches PATH when omitted)
    #[arg(long)]
    pub ffmpeg: Option<PathBuf>,

    /// Glob pattern for input files
    #[arg(short, long, default_value = "*")]
    pub pattern: String,

    /// Merge all clips of a date into one file instead of one per channel
    #[arg(long, default_value_t = false)]
    pub no_split: bool,

    /// Channel pattern as LABEL=REGEX, repeatable (default: FR=_FR$ RE=_RE$)
    #[arg(long, value_name = "LABEL=REGEX")]
    pub channel: Vec<String>,

    /// Output naming scheme
    #[arg(long, value_enum, default_value_t = NamingMode::Channel)]
    pub naming: NamingMode,

    /// What to do when a merge job fails
    #[arg(long, value_enum, default_value_t = FailureMode::Continue)]
    pub on_failure: FailureMode,

    /// File extension shared by the clips and the merged outputs
    #[arg(long, default_value = "mp4")]
    pub container: String,

    /// Directory for concat manifests (defaults to the output directory)
    #[arg(long)]
    pub scratch_dir: Option<PathBuf>,

    /// List the planned merge jobs without running ffmpeg
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
