//! # 数据模型模块
//!
//! 定义片段名称与合并计划的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`batch/` 和 `commands/` 使用
//! - 子模块: clip, plan

pub mod clip;
pub mod plan;

pub use clip::ClipName;
pub use plan::{ClipBatch, DateMap, GroupDateMap};
