//! # 目录列表收集器
//!
//! 列出输入目录下的文件名，供解析器筛选片段。
//!
//! ## 功能
//! - 平铺列出目录（不递归，不含子目录）
//! - 可选 glob 模式过滤，默认 `*` 即不过滤
//! - 保持操作系统返回的列表顺序，不排序
//!
//! 按扩展名排除非视频文件不在此处做：不匹配命名模式的
//! 文件由解析阶段静默丢弃。
//!
//! ## 依赖关系
//! - 被 `commands/scan.rs`、`commands/merge.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 做模式匹配

use crate::error::{DashmergeError, Result};

use std::path::PathBuf;
use walkdir::WalkDir;

/// 片段文件名收集器
pub struct ClipCollector {
    /// 输入目录
    input: PathBuf,
    /// 匹配模式
    pattern: String,
}

impl ClipCollector {
    /// 创建新的收集器
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            pattern: "*".to_string(),
        }
    }

    /// 设置文件名匹配模式
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = pattern.to_string();
        self
    }

    /// 收集目录下的全部文件名（不含路径前缀）
    pub fn collect(&self) -> Result<Vec<String>> {
        if !self.input.is_dir() {
            return Err(DashmergeError::DirectoryNotFound {
                path: self.input.display().to_string(),
            });
        }

        let glob_pattern = glob::Pattern::new(&self.pattern).map_err(|e| {
            DashmergeError::InvalidArgument(format!("Invalid pattern '{}': {}", self.pattern, e))
        })?;

        let names = WalkDir::new(&self.input)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.file_name().to_str().map(|s| s.to_string()))
            .filter(|name| glob_pattern.matches(name))
            .collect();

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_lists_files_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("241227_121549_001_FR.MP4"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();
        fs::write(dir.path().join("subdir").join("nested.mp4"), b"").unwrap();

        let mut names = ClipCollector::new(dir.path().to_path_buf())
            .collect()
            .unwrap();
        names.sort();

        assert_eq!(names, vec!["241227_121549_001_FR.MP4", "notes.txt"]);
    }

    #[test]
    fn test_collect_applies_pattern() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("241227_121549_001_FR.MP4"), b"").unwrap();
        fs::write(dir.path().join("241227_121549_001_FR.gps"), b"").unwrap();

        let names = ClipCollector::new(dir.path().to_path_buf())
            .with_pattern("*.MP4")
            .collect()
            .unwrap();

        assert_eq!(names, vec!["241227_121549_001_FR.MP4"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("nope");
        let result = ClipCollector::new(gone).collect();
        assert!(matches!(
            result,
            Err(DashmergeError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = ClipCollector::new(dir.path().to_path_buf())
            .with_pattern("[")
            .collect();
        assert!(matches!(result, Err(DashmergeError::InvalidArgument(_))));
    }
}
