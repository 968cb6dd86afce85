//! # 合并计划数据模型
//!
//! 定义日期映射与通道分批映射，两者都保持插入顺序：
//! 日期按目录列表中首次出现的顺序排列，日期内的片段保持
//! 目录列表顺序，批次按通道模式顺序排列。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 使用
//! - 使用 `models/clip.rs`

use crate::models::ClipName;

/// 日期映射：日期键 -> 该日期的片段序列（插入顺序）
#[derive(Debug, Clone, Default)]
pub struct DateMap {
    entries: Vec<(String, Vec<ClipName>)>,
}

impl DateMap {
    /// 创建空映射
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个片段到其日期分组，日期首次出现时建组
    pub fn insert(&mut self, clip: ClipName) {
        match self.entries.iter_mut().find(|(d, _)| *d == clip.date) {
            Some((_, clips)) => clips.push(clip),
            None => self.entries.push((clip.date.clone(), vec![clip])),
        }
    }

    /// 查找某日期的片段
    pub fn get(&self, date: &str) -> Option<&[ClipName]> {
        self.entries
            .iter()
            .find(|(d, _)| d == date)
            .map(|(_, clips)| clips.as_slice())
    }

    /// 按插入顺序迭代 (日期, 片段) 对
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ClipName])> {
        self.entries
            .iter()
            .map(|(d, clips)| (d.as_str(), clips.as_slice()))
    }

    /// 日期数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全部片段数量
    pub fn total_clips(&self) -> usize {
        self.entries.iter().map(|(_, clips)| clips.len()).sum()
    }
}

/// 一个合并批次：同日期、同通道的有序片段
#[derive(Debug, Clone)]
pub struct ClipBatch {
    /// 产生该批次的通道标签（关闭通道拆分时为 None）
    pub label: Option<String>,
    /// 批次内片段，保持目录列表顺序
    pub clips: Vec<ClipName>,
}

impl ClipBatch {
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// 批次首个片段（清单命名与输出命名的依据）
    pub fn first(&self) -> Option<&ClipName> {
        self.clips.first()
    }
}

/// 分批映射：日期键 -> 批次序列（插入顺序）
#[derive(Debug, Clone, Default)]
pub struct GroupDateMap {
    groups: Vec<(String, Vec<ClipBatch>)>,
}

impl GroupDateMap {
    /// 创建空映射
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个日期的全部批次（调用方保证日期不重复）
    pub fn push(&mut self, date: impl Into<String>, batches: Vec<ClipBatch>) {
        self.groups.push((date.into(), batches));
    }

    /// 按插入顺序迭代 (日期, 批次) 对
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ClipBatch])> {
        self.groups
            .iter()
            .map(|(d, batches)| (d.as_str(), batches.as_slice()))
    }

    /// 日期数量
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 非空批次数量 = 实际会执行的合并作业数
    pub fn job_count(&self) -> usize {
        self.groups
            .iter()
            .map(|(_, batches)| batches.iter().filter(|b| !b.is_empty()).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(date: &str, time: &str, channel: &str) -> ClipName {
        ClipName {
            date: date.to_string(),
            time: time.to_string(),
            sequence: "001".to_string(),
            channel: channel.to_string(),
            canonical: format!("{}_{}_001_{}", date, time, channel),
        }
    }

    #[test]
    fn test_date_map_preserves_insertion_order() {
        let mut map = DateMap::new();
        map.insert(clip("241228", "090000", "FR"));
        map.insert(clip("241227", "100000", "FR"));
        map.insert(clip("241228", "090100", "RE"));

        let dates: Vec<&str> = map.iter().map(|(d, _)| d).collect();
        assert_eq!(dates, vec!["241228", "241227"]);

        let entries = map.get("241228").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].canonical, "241228_090000_001_FR");
        assert_eq!(entries[1].canonical, "241228_090100_001_RE");
    }

    #[test]
    fn test_date_map_counts() {
        let mut map = DateMap::new();
        assert!(map.is_empty());
        map.insert(clip("241227", "100000", "FR"));
        map.insert(clip("241227", "100100", "FR"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.total_clips(), 2);
    }

    #[test]
    fn test_job_count_skips_empty_batches() {
        let mut groups = GroupDateMap::new();
        groups.push(
            "241227",
            vec![
                ClipBatch {
                    label: Some("FR".to_string()),
                    clips: vec![clip("241227", "100000", "FR")],
                },
                ClipBatch {
                    label: Some("RE".to_string()),
                    clips: vec![],
                },
            ],
        );
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.job_count(), 1);
    }
}
