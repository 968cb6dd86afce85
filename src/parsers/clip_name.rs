//! # 片段文件名解析器
//!
//! 解析行车记录仪文件名中的日期/时间/序号/通道编码。
//!
//! ## 匹配规则
//! ```text
//! (\d{6})_(\d{6})_(\d{3})_(\w{2})
//!  日期    时间    序号    通道
//! ```
//! 在整个文件名中任意位置匹配，只取第一个匹配；扩展名
//! 不含于匹配（`.` 不是单词字符），规范标识符天然去扩展名。
//! 不匹配的文件名返回 `None`，由调用方静默排除。
//!
//! ## 依赖关系
//! - 被 `batch/grouper.rs` 使用
//! - 使用 `models/clip.rs`

use crate::models::ClipName;

use regex::Regex;
use std::sync::OnceLock;

static CLIP_NAME: OnceLock<Regex> = OnceLock::new();

fn clip_name_regex() -> &'static Regex {
    CLIP_NAME.get_or_init(|| Regex::new(r"(\d{6})_(\d{6})_(\d{3})_(\w{2})").unwrap())
}

/// 解析单个文件名，不匹配时返回 None
pub fn parse_clip_name(file_name: &str) -> Option<ClipName> {
    let caps = clip_name_regex().captures(file_name)?;

    Some(ClipName {
        date: caps[1].to_string(),
        time: caps[2].to_string(),
        sequence: caps[3].to_string(),
        channel: caps[4].to_string(),
        canonical: caps[0].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_front_clip() {
        let clip = parse_clip_name("241227_121549_001_FR.MP4").unwrap();
        assert_eq!(clip.date, "241227");
        assert_eq!(clip.time, "121549");
        assert_eq!(clip.sequence, "001");
        assert_eq!(clip.channel, "FR");
        assert_eq!(clip.canonical, "241227_121549_001_FR");
    }

    #[test]
    fn test_parse_rear_clip() {
        let clip = parse_clip_name("240101_100000_001_RE.mp4").unwrap();
        assert_eq!(clip.date, "240101");
        assert_eq!(clip.channel, "RE");
        assert_eq!(clip.canonical, "240101_100000_001_RE");
    }

    #[test]
    fn test_extension_is_stripped_from_canonical() {
        let clip = parse_clip_name("241227_121549_007_FR.MP4").unwrap();
        assert!(!clip.canonical.contains('.'));
        assert_eq!(clip.canonical, "241227_121549_007_FR");
    }

    #[test]
    fn test_matches_anywhere_in_name() {
        let clip = parse_clip_name("backup-241227_121549_001_RE.MP4").unwrap();
        assert_eq!(clip.date, "241227");
        assert_eq!(clip.canonical, "241227_121549_001_RE");
    }

    #[test]
    fn test_first_match_wins() {
        let clip = parse_clip_name("241227_121549_001_FR_241228_131549_002_RE.MP4").unwrap();
        assert_eq!(clip.date, "241227");
        assert_eq!(clip.canonical, "241227_121549_001_FR");
    }

    #[test]
    fn test_lowercase_channel_accepted() {
        let clip = parse_clip_name("241227_121549_001_fr.mp4").unwrap();
        assert_eq!(clip.channel, "fr");
    }

    #[test]
    fn test_non_matching_names_excluded() {
        assert!(parse_clip_name("IMG_1234.jpg").is_none());
        assert!(parse_clip_name("map.dat").is_none());
        assert!(parse_clip_name("241227_1215_001_FR.MP4").is_none());
        assert!(parse_clip_name("241227_121549_01_FR.MP4").is_none());
        assert!(parse_clip_name("").is_none());
    }
}
