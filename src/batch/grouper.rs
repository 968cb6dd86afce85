//! # 日期分组与通道拆分
//!
//! 将解析后的片段名先按日期聚合，再按通道模式拆分成合并批次。
//!
//! ## 功能
//! - `build_date_map` 按日期聚合片段，保持首次出现顺序
//! - `ChannelPattern` 带标签的通道正则，支持 `LABEL=REGEX` 语法
//! - `split_channels` 依次用每个模式筛选日期内的片段
//! - `single_batch` 不拆分通道时每个日期一个批次
//! - `overlapping_entries` 找出被多个模式命中的片段
//!
//! 拆分产生的空批次保留在结果里，由合并驱动决定跳过。
//!
//! ## 依赖关系
//! - 被 `commands/scan.rs`、`commands/merge.rs` 调用
//! - 依赖 `models/plan.rs` 的 `DateMap` / `GroupDateMap`

use crate::error::{DashmergeError, Result};
use crate::models::{ClipBatch, ClipName, DateMap, GroupDateMap};

use regex::Regex;

/// 前置摄像头的默认通道模式
pub const DEFAULT_FRONT_PATTERN: &str = r"_FR$";
/// 后置摄像头的默认通道模式
pub const DEFAULT_REAR_PATTERN: &str = r"_RE$";

/// 带标签的通道匹配模式
#[derive(Debug, Clone)]
pub struct ChannelPattern {
    /// 通道标签，用于输出命名与状态显示
    pub label: String,
    /// 对规范名（无扩展名）生效的正则
    pub regex: Regex,
}

impl ChannelPattern {
    /// 直接从标签与正则文本构造
    pub fn new(label: &str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            DashmergeError::InvalidChannelSpec(format!("bad regex '{}': {}", pattern, e))
        })?;
        Ok(Self {
            label: label.to_string(),
            regex,
        })
    }

    /// 解析命令行的 `LABEL=REGEX` 写法
    pub fn parse(spec: &str) -> Result<Self> {
        let (label, pattern) = spec.split_once('=').ok_or_else(|| {
            DashmergeError::InvalidChannelSpec(format!(
                "'{}' is not in LABEL=REGEX form",
                spec
            ))
        })?;
        if label.is_empty() {
            return Err(DashmergeError::InvalidChannelSpec(format!(
                "'{}' has an empty label",
                spec
            )));
        }
        Self::new(label, pattern)
    }

    /// 判断片段是否属于该通道
    pub fn matches(&self, clip: &ClipName) -> bool {
        self.regex.is_match(&clip.canonical)
    }
}

/// 默认通道模式：前摄 FR、后摄 RE
pub fn default_channel_patterns() -> Vec<ChannelPattern> {
    vec![
        ChannelPattern::new("FR", DEFAULT_FRONT_PATTERN).unwrap(),
        ChannelPattern::new("RE", DEFAULT_REAR_PATTERN).unwrap(),
    ]
}

/// 解析命令行的模式列表，未给出时回退默认模式
pub fn patterns_from_specs(specs: &[String]) -> Result<Vec<ChannelPattern>> {
    if specs.is_empty() {
        return Ok(default_channel_patterns());
    }
    specs.iter().map(|s| ChannelPattern::parse(s)).collect()
}

/// 按日期聚合片段名，不识别的文件名静默丢弃
///
/// 日期顺序与日期内顺序都沿用输入列表的顺序。
pub fn build_date_map(names: &[String]) -> DateMap {
    let mut map = DateMap::new();
    for name in names {
        if let Some(clip) = crate::parsers::parse_clip_name(name) {
            map.insert(clip);
        }
    }
    map
}

/// 按通道模式把每个日期拆成多个批次
///
/// 批次顺序与模式顺序一致，空批次保留。
pub fn split_channels(map: &DateMap, patterns: &[ChannelPattern]) -> GroupDateMap {
    let mut groups = GroupDateMap::new();
    for (date, clips) in map.iter() {
        let batches = patterns
            .iter()
            .map(|p| ClipBatch {
                label: Some(p.label.clone()),
                clips: clips.iter().filter(|c| p.matches(c)).cloned().collect(),
            })
            .collect();
        groups.push(date, batches);
    }
    groups
}

/// 不拆分通道：每个日期的全部片段进同一个批次
pub fn single_batch(map: &DateMap) -> GroupDateMap {
    let mut groups = GroupDateMap::new();
    for (date, clips) in map.iter() {
        groups.push(
            date,
            vec![ClipBatch {
                label: None,
                clips: clips.to_vec(),
            }],
        );
    }
    groups
}

/// 找出被两个以上通道模式命中的规范名
///
/// 这类片段会在多个输出里重复出现，调用方应提示用户。
pub fn overlapping_entries(map: &DateMap, patterns: &[ChannelPattern]) -> Vec<String> {
    let mut overlapping = Vec::new();
    for (_, clips) in map.iter() {
        for clip in clips {
            let hits = patterns.iter().filter(|p| p.matches(clip)).count();
            if hits > 1 {
                overlapping.push(clip.canonical.clone());
            }
        }
    }
    overlapping
}
