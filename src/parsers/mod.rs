//! # 解析器模块
//!
//! 提供片段文件名的模式解析。
//!
//! ## 依赖关系
//! - 被 `batch/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: clip_name

pub mod clip_name;

pub use clip_name::parse_clip_name;
