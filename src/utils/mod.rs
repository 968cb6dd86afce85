//! # 工具函数模块
//!
//! 提供美化输出、进度条、FFmpeg 调用等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 与 `batch/` 模块使用
//! - 子模块: output, progress, ffmpeg

pub mod ffmpeg;
pub mod output;
pub mod progress;
