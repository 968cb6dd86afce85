//! # 合并驱动
//!
//! 顺序执行分批映射里的合并作业，每个非空批次一次 ffmpeg
//! concat 调用，过程中向调用方回报类型化事件。
//!
//! ## 功能
//! - 展开分批映射为作业列表（清单路径、输出路径、来源文件）
//! - 每个作业：写清单 -> 调 ffmpeg -> 成功后删清单
//! - 空批次跳过并计入统计
//! - 失败策略：继续收集或立即中止
//! - 新旧两套输出命名方案
//!
//! 作业严格按顺序执行，不并行：多个 ffmpeg 同时做流复制
//! 会互相争抢磁盘带宽，顺序执行反而更快。
//!
//! ## 依赖关系
//! - 被 `commands/merge.rs` 调用
//! - 使用 `utils/ffmpeg.rs` 调用外部命令
//! - 使用 `models/plan.rs` 的 `GroupDateMap`

use crate::error::{DashmergeError, Result};
use crate::models::GroupDateMap;
use crate::utils::ffmpeg;

use std::fs;
use std::path::PathBuf;

/// 作业失败后的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// 记录失败，继续执行后续作业
    Continue,
    /// 首个失败即停止派发后续作业
    Abort,
}

/// 输出文件命名方案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Naming {
    /// 按批次标签命名：`<日期>_<标签>_merged.<容器>`
    Channel,
    /// 旧版命名：序号 0 记 FR、其余记 RE，批次数超过两个时
    /// 中段留空（产生双下划线，且同日期各批次同名互相覆盖）
    Legacy,
}

/// 合并驱动配置
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// 片段所在目录，清单行引用这里的文件
    pub input_dir: PathBuf,
    /// 合并结果输出目录
    pub output_dir: PathBuf,
    /// 已解析的 ffmpeg 路径
    pub tool_path: PathBuf,
    /// 清单文件目录，缺省时写到输出目录
    pub scratch_dir: Option<PathBuf>,
    /// 片段与输出的容器扩展名
    pub container: String,
    /// 输出命名方案
    pub naming: Naming,
    /// 失败策略
    pub on_failure: OnFailure,
}

/// 合并过程事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeEvent {
    /// 工具路径无效，批次未开始
    ConfigurationError(String),
    /// 批次开始，携带待执行作业数
    BatchStarted { jobs: usize },
    /// 单个作业开始
    JobStarted {
        date: String,
        index: usize,
        label: Option<String>,
        output: String,
    },
    /// 单个作业成功
    JobCompleted { date: String, index: usize },
    /// 单个作业失败
    JobFailed {
        date: String,
        index: usize,
        message: String,
    },
    /// 批次结束（无论成败）
    BatchFinished,
}

/// 一个展开后的合并作业
#[derive(Debug, Clone)]
pub struct MergeJob {
    /// 所属日期
    pub date: String,
    /// 批次在该日期内的序号（空批次不重排序号）
    pub index: usize,
    /// 通道标签
    pub label: Option<String>,
    /// 输出文件名
    pub output_name: String,
    /// 清单文件完整路径，命名取批次首个片段
    pub manifest_path: PathBuf,
    /// 输出文件完整路径
    pub output_path: PathBuf,
    /// 清单引用的来源文件
    pub sources: Vec<PathBuf>,
}

/// 批次执行统计
#[derive(Debug, Default)]
pub struct MergeReport {
    /// 成功数量
    pub success: usize,
    /// 跳过数量（空批次）
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情 (输出文件名, 错误信息)
    pub failures: Vec<(String, String)>,
}

impl MergeReport {
    /// 总批次数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 合并驱动
pub struct MergeDriver {
    options: MergeOptions,
}

impl MergeDriver {
    /// 创建新的合并驱动
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    /// 展开分批映射为作业列表，空批次跳过
    pub fn planned_jobs(&self, groups: &GroupDateMap) -> Vec<MergeJob> {
        let scratch = self
            .options
            .scratch_dir
            .as_deref()
            .unwrap_or(&self.options.output_dir);

        let mut jobs = Vec::new();
        for (date, batches) in groups.iter() {
            let batch_count = batches.len();
            for (index, batch) in batches.iter().enumerate() {
                let first = match batch.first() {
                    Some(clip) => clip,
                    None => continue,
                };

                let output_name =
                    self.output_name(date, index, batch_count, batch.label.as_deref());
                jobs.push(MergeJob {
                    date: date.to_string(),
                    index,
                    label: batch.label.clone(),
                    manifest_path: scratch.join(format!("{}.txt", first.canonical)),
                    output_path: self.options.output_dir.join(&output_name),
                    output_name,
                    sources: batch
                        .clips
                        .iter()
                        .map(|c| {
                            self.options
                                .input_dir
                                .join(c.file_name(&self.options.container))
                        })
                        .collect(),
                });
            }
        }
        jobs
    }

    /// 顺序执行全部作业，事件回调同步接收进度
    ///
    /// 仅在工具路径无效时返回错误；作业失败记入统计，由
    /// 调用方根据 `failed` 决定整体结果。
    pub fn run<F>(&self, groups: &GroupDateMap, mut notify: F) -> Result<MergeReport>
    where
        F: FnMut(&MergeEvent),
    {
        if !self.options.tool_path.is_file() {
            let message = format!("ffmpeg path invalid: {}", self.options.tool_path.display());
            notify(&MergeEvent::ConfigurationError(message));
            return Err(DashmergeError::ToolNotFound {
                path: self.options.tool_path.display().to_string(),
            });
        }

        let total_batches: usize = groups.iter().map(|(_, batches)| batches.len()).sum();
        let jobs = self.planned_jobs(groups);

        let mut report = MergeReport {
            skipped: total_batches - jobs.len(),
            ..Default::default()
        };

        notify(&MergeEvent::BatchStarted { jobs: jobs.len() });

        for job in &jobs {
            notify(&MergeEvent::JobStarted {
                date: job.date.clone(),
                index: job.index,
                label: job.label.clone(),
                output: job.output_name.clone(),
            });

            match self.execute_job(job) {
                Ok(()) => {
                    report.success += 1;
                    notify(&MergeEvent::JobCompleted {
                        date: job.date.clone(),
                        index: job.index,
                    });
                }
                Err(e) => {
                    let message = e.to_string();
                    report.failed += 1;
                    report.failures.push((job.output_name.clone(), message.clone()));
                    notify(&MergeEvent::JobFailed {
                        date: job.date.clone(),
                        index: job.index,
                        message,
                    });

                    if self.options.on_failure == OnFailure::Abort {
                        break;
                    }
                }
            }
        }

        notify(&MergeEvent::BatchFinished);
        Ok(report)
    }

    /// 执行单个作业：写清单、删旧输出、调 ffmpeg、删清单
    ///
    /// 旧清单与旧输出的删除失败直接忽略；成功后的清单清理
    /// 同样忽略失败，失败时清单留在原地便于排查。
    fn execute_job(&self, job: &MergeJob) -> Result<()> {
        fs::remove_file(&job.manifest_path).ok();
        fs::write(&job.manifest_path, manifest_content(&job.sources)).map_err(|e| {
            DashmergeError::FileWriteError {
                path: job.manifest_path.display().to_string(),
                source: e,
            }
        })?;

        fs::remove_file(&job.output_path).ok();
        ffmpeg::run_concat(&self.options.tool_path, &job.manifest_path, &job.output_path)?;

        fs::remove_file(&job.manifest_path).ok();
        Ok(())
    }

    /// 根据命名方案生成输出文件名
    fn output_name(
        &self,
        date: &str,
        index: usize,
        batch_count: usize,
        label: Option<&str>,
    ) -> String {
        match self.options.naming {
            Naming::Channel => match label {
                Some(label) => format!("{}_{}_merged.{}", date, label, self.options.container),
                None => format!("{}_merged.{}", date, self.options.container),
            },
            Naming::Legacy => {
                let channel = if batch_count > 2 {
                    ""
                } else if index == 0 {
                    "FR"
                } else {
                    "RE"
                };
                format!("{}_{}_merged.{}", date, channel, self.options.container)
            }
        }
    }
}

/// 清单内容：每个来源一行 `file '<路径>'`，无结尾换行
fn manifest_content(sources: &[PathBuf]) -> String {
    sources
        .iter()
        .map(|p| format!("file '{}'", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}
