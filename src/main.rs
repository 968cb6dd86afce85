//! # Dashmerge - 行车记录仪片段批量合并工具
//!
//! 把记录仪按分钟切碎的片段按日期和通道重新拼成完整视频，
//! 合并走 ffmpeg concat demuxer 的流复制，不重新编码。
//!
//! ## 子命令
//! - `merge` - 分组并逐批合并 (ffmpeg concat)
//! - `scan`  - 预览分组结果，不执行合并
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (收集、分组、合并驱动)
//!   │     ├── parsers/   (片段文件名解析)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
