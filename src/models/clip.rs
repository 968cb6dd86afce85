//! # 行车记录仪片段数据模型
//!
//! 定义从文件名解析出的片段标识信息。
//!
//! ## 文件名格式
//! ```text
//! 241227_121549_001_FR.MP4
//! └日期┘ └时间┘ └序号┘└通道┘
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `batch/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 从文件名解析出的片段名称
///
/// `canonical` 是去掉扩展名后的完整匹配串，后续所有分组、
/// 清单生成和输出命名都以它为准。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipName {
    /// 6 位日期码（如 `241227`），分组键
    pub date: String,

    /// 6 位时间码（如 `121549`）
    pub time: String,

    /// 3 位序号（如 `001`）
    pub sequence: String,

    /// 通道后缀（如 `FR` / `RE`）
    pub channel: String,

    /// 规范标识符：完整匹配串，如 `241227_121549_001_FR`
    pub canonical: String,
}

impl ClipName {
    /// 带扩展名的源文件名（清单引用用）
    pub fn file_name(&self, container: &str) -> String {
        format!("{}.{}", self.canonical, container)
    }
}

impl std::fmt::Display for ClipName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClipName {
        ClipName {
            date: "241227".to_string(),
            time: "121549".to_string(),
            sequence: "001".to_string(),
            channel: "FR".to_string(),
            canonical: "241227_121549_001_FR".to_string(),
        }
    }

    #[test]
    fn test_file_name_appends_container() {
        assert_eq!(sample().file_name("mp4"), "241227_121549_001_FR.mp4");
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(sample().to_string(), "241227_121549_001_FR");
    }
}
