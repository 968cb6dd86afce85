//! # 批量处理模块
//!
//! 从目录列表到合并产物的整条流水线。
//!
//! ## 功能
//! - 收集输入目录的文件名
//! - 按日期聚合、按通道拆分批次
//! - 顺序驱动 ffmpeg 执行合并作业
//!
//! ## 依赖关系
//! - 被各命令模块使用
//! - 使用 `parsers/` 解析文件名
//! - 使用 `utils/ffmpeg.rs` 调用外部命令

pub mod collector;
pub mod driver;
pub mod grouper;

pub use collector::ClipCollector;
pub use driver::{MergeDriver, MergeEvent, MergeOptions, MergeReport, Naming, OnFailure};
pub use grouper::ChannelPattern;
