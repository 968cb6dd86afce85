//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `merge`: 按日期和通道分组后调用 ffmpeg 逐批合并
//! - `scan`: 只分组不合并，预览分组结果
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: merge, scan

pub mod merge;
pub mod scan;

use clap::{Parser, Subcommand};

/// Dashmerge - 行车记录仪片段批量合并工具
#[derive(Parser)]
#[command(name = "dashmerge")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "A dashcam clip grouping and batch merging tool built on FFmpeg", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Group dashcam clips by date and merge each group with FFmpeg
    Merge(merge::MergeArgs),

    /// Preview how clips would be grouped, without merging
    Scan(scan::ScanArgs),
}
