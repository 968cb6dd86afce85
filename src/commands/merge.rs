//! # merge 命令实现
//!
//! 把行车记录仪片段按日期/通道分组，逐批调用 ffmpeg 合并。
//!
//! ## 功能
//! - 解析 ffmpeg 路径并验证
//! - 收集、解析、分组片段
//! - 顺序执行合并作业，进度条加逐作业状态行
//! - 支持 dry-run 预览与失败策略
//!
//! ## 依赖关系
//! - 使用 `cli/merge.rs` 定义的参数
//! - 使用 `batch/` 的收集、分组、驱动
//! - 使用 `utils/output.rs`, `utils/progress.rs`, `utils/ffmpeg.rs`

use crate::batch::driver::MergeJob;
use crate::batch::grouper;
use crate::batch::{ClipCollector, MergeDriver, MergeEvent, MergeOptions, Naming, OnFailure};
use crate::cli::merge::{FailureMode, MergeArgs, NamingMode};
use crate::error::{DashmergeError, Result};
use crate::utils::{ffmpeg, output, progress};

use std::fs;

/// 执行 merge 命令
pub fn execute(args: MergeArgs) -> Result<()> {
    output::print_header("Merging Dashcam Clips");

    // 解析 ffmpeg 路径
    let tool_path = ffmpeg::resolve_tool(args.ffmpeg.as_deref())?;
    output::print_info(&format!("Using ffmpeg at '{}'", tool_path.display()));

    // 创建输出目录
    fs::create_dir_all(&args.output).map_err(|e| DashmergeError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;
    if let Some(ref scratch) = args.scratch_dir {
        fs::create_dir_all(scratch).map_err(|e| DashmergeError::FileWriteError {
            path: scratch.display().to_string(),
            source: e,
        })?;
    }

    // 收集输入文件
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

    // 解析和分组
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
                "{} clip(s) match more than one channel pattern and will land in several outputs",
                overlap.len()
            ));
        }
        grouper::split_channels(&map, &patterns)
    };

    let driver = MergeDriver::new(MergeOptions {
        input_dir: args.input.clone(),
        output_dir: args.output.clone(),
        tool_path,
        scratch_dir: args.scratch_dir.clone(),
        container: args.container.clone(),
        naming: match args.naming {
            NamingMode::Channel => Naming::Channel,
            NamingMode::Legacy => Naming::Legacy,
        },
        on_failure: match args.on_failure {
            FailureMode::Continue => OnFailure::Continue,
            FailureMode::Abort => OnFailure::Abort,
        },
    });

    // 预览模式：只列出作业
    if args.dry_run {
        let jobs = driver.planned_jobs(&groups);
        if jobs.is_empty() {
            output::print_warning("Nothing to merge: every batch is empty.");
            return Ok(());
        }
        for job in &jobs {
            output::print_info(&format!(
                "[DRY] {} ({} clip(s)) -> {}",
                job_desc(job),
                job.sources.len(),
                job.output_name
            ));
        }
        output::print_done(&format!("{} job(s) planned, nothing executed", jobs.len()));
        return Ok(());
    }

    let jobs_total = groups.job_count();
    if jobs_total == 0 {
        output::print_warning("Nothing to merge: every batch is empty.");
        return Ok(());
    }

    // 执行合并，事件驱动进度显示
    let pb = progress::create_progress_bar(jobs_total as u64, "Merging");
    let mut job_desc_line = String::new();
    let mut job_target = String::new();

    let report = driver.run(&groups, |event| match event {
        MergeEvent::BatchStarted { .. }
        | MergeEvent::BatchFinished
        | MergeEvent::ConfigurationError(_) => {}
        MergeEvent::JobStarted {
            date,
            label,
            output: target,
            ..
        } => {
            job_desc_line = match label {
                Some(label) => format!("{} [{}]", date, label),
                None => date.clone(),
            };
            job_target = target.clone();
            pb.set_message(job_target.clone());
        }
        MergeEvent::JobCompleted { .. } => {
            pb.suspend(|| output::print_merge(&job_desc_line, &job_target));
            pb.inc(1);
        }
        MergeEvent::JobFailed { message, .. } => {
            pb.suspend(|| output::print_error(&format!("{}: {}", job_target, message)));
            pb.inc(1);
        }
    })?;

    pb.finish_and_clear();

    output::print_separator();
    if report.skipped > 0 {
        output::print_skip(&format!("{} empty batch(es) skipped", report.skipped));
    }
    output::print_done(&format!(
        "Merged {} batch(es) into '{}' ({} failed)",
        report.success,
        args.output.display(),
        report.failed
    ));

    if report.failed > 0 {
        return Err(DashmergeError::JobsFailed {
            failed: report.failed,
            total: jobs_total,
        });
    }

    Ok(())
}

/// 作业的简短描述：日期加通道标签
fn job_desc(job: &MergeJob) -> String {
    match job.label {
        Some(ref label) => format!("{} [{}]", job.date, label),
        None => job.date.clone(),
    }
}
