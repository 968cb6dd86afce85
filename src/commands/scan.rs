//! # scan 命令实现
//!
//! 扫描输入目录，展示片段按日期/通道的分组结果，不合并。
//!
//! ## 功能
//! - 收集并解析片段文件名
//! - 按日期聚合、按通道拆分
//! - 生成终端表格和可选 CSV 输出
//! - 提示跨通道重叠的片段
//!
//! ## 依赖关系
//! - 使用 `cli/scan.rs` 定义的参数
//! - 使用 `batch/collector.rs`, `batch/grouper.rs`
//! - 使用 `utils/output.rs`

use crate::batch::grouper;
use crate::batch::ClipCollector;
use crate::cli::scan::ScanArgs;
use crate::error::{DashmergeError, Result};
use crate::models::GroupDateMap;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 分组结果行
#[derive(Debug, Clone, Tabled)]
struct GroupRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Clips")]
    clips: usize,
    #[tabled(rename = "First")]
    first: String,
    #[tabled(rename = "Last")]
    last: String,
}

/// 执行 scan 命令
pub fn execute(args: ScanArgs) -> Result<()> {
    output::print_header("Scanning Dashcam Clips");

    let names = ClipCollector::new(args.input.clone())
        .with_pattern(&args.pattern)
        .collect()?;

    if names.is_empty() {
        output::print_warning(&format!(
            "No files matched '{}' under {}",
            args.pattern,
            args.input.display()
        ));
        return Ok(());
    }

    let map = grouper::build_date_map(&names);
    if map.is_empty() {
        output::print_warning(&format!(
            "None of the {} file(s) look like dashcam clips",
            names.len()
        ));
        return Ok(());
    }

    output::print_info(&format!(
        "Recognized {} clip(s) across {} date(s)",
        map.total_clips(),
        map.len()
    ));

    let patterns = grouper::patterns_from_specs(&args.channel)?;
    let groups = if args.no_split {
        grouper::single_batch(&map)
    } else {
        let overlap = grouper::overlapping_entries(&map, &patterns);
        if !overlap.is_empty() {
            output::print_warning(&format!(
                "{} clip(s) match more than one channel pattern: {}",
                overlap.len(),
                overlap.join(", ")
            ));
        }
        grouper::split_channels(&map, &patterns)
    };

    let rows = group_rows(&groups);
    let table = Table::new(&rows);
    println!("{}", table);

    output::print_info(&format!("{} merge job(s) would run", groups.job_count()));

    if let Some(ref export) = args.export {
        save_groups_csv(&rows, export)?;
        output::print_success(&format!("Grouping table saved to '{}'", export.display()));
    }

    Ok(())
}

/// 生成表格数据，空批次也列出
fn group_rows(groups: &GroupDateMap) -> Vec<GroupRow> {
    let mut rows = Vec::new();
    for (date, batches) in groups.iter() {
        for batch in batches {
            rows.push(GroupRow {
                date: date.to_string(),
                channel: batch.label.clone().unwrap_or_else(|| "all".to_string()),
                clips: batch.len(),
                first: batch
                    .first()
                    .map(|c| c.canonical.clone())
                    .unwrap_or_else(|| "-".to_string()),
                last: batch
                    .clips
                    .last()
                    .map(|c| c.canonical.clone())
                    .unwrap_or_else(|| "-".to_string()),
            });
        }
    }
    rows
}

/// 保存分组表到 CSV
fn save_groups_csv(rows: &[GroupRow], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(DashmergeError::CsvError)?;

    wtr.write_record(["date", "channel", "clips", "first", "last"])
        .map_err(DashmergeError::CsvError)?;

    for row in rows {
        wtr.write_record([
            row.date.clone(),
            row.channel.clone(),
            row.clips.to_string(),
            row.first.clone(),
            row.last.clone(),
        ])
        .map_err(DashmergeError::CsvError)?;
    }

    wtr.flush().map_err(|e| DashmergeError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_rows_covers_empty_batches() {
        let names = vec![
            "241227_121549_001_FR.MP4".to_string(),
            "241227_122549_002_FR.MP4".to_string(),
        ];
        let map = grouper::build_date_map(&names);
        let groups = grouper::split_channels(&map, &grouper::default_channel_patterns());

        let rows = group_rows(&groups);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].date, "241227");
        assert_eq!(rows[0].channel, "FR");
        assert_eq!(rows[0].clips, 2);
        assert_eq!(rows[0].first, "241227_121549_001_FR");
        assert_eq!(rows[0].last, "241227_122549_002_FR");

        assert_eq!(rows[1].channel, "RE");
        assert_eq!(rows[1].clips, 0);
        assert_eq!(rows[1].first, "-");
        assert_eq!(rows[1].last, "-");
    }

    #[test]
    fn test_group_rows_without_split() {
        let names = vec![
            "241227_121549_001_FR.MP4".to_string(),
            "241227_121549_001_RE.MP4".to_string(),
        ];
        let map = grouper::build_date_map(&names);
        let groups = grouper::single_batch(&map);

        let rows = group_rows(&groups);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].channel, "all");
        assert_eq!(rows[0].clips, 2);
    }
}
