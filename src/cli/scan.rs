//! # scan 子命令 CLI 定义
//!
//! 扫描输入目录并展示分组结果，不执行合并。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/scan.rs`

use clap::Args;
use std::path::PathBuf;

/// scan 子命令参数
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Input directory containing dashcam clips
    #[arg(short, long)]
    pub input: PathBuf,

    /// Glob pattern for input files
    #[arg(short, long, default_value = "*")]
    pub pattern: String,

    /// Group all clips of a date together instead of splitting by channel
    #[arg(long, default_value_t = false)]
    pub no_split: bool,

    /// Channel pattern as LABEL=REGEX, repeatable (default: FR=_FR$ RE=_RE$)
    #[arg(long, value_name = "LABEL=REGEX")]
    pub channel: Vec<String>,

    /// Export the grouping table to a CSV file
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}
