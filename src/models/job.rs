//! # 作业与批次结果数据模型
//!
//! ## 依赖关系
//! - 被 `batch/` 使用
//! - 被 `commands/batch.rs` 用于汇总输出

use std::path::{Path, PathBuf};

/// 单个作业：源目录与目标目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// 源目录
    pub source: PathBuf,
    /// 目标目录
    pub dest: PathBuf,
}

impl WorkItem {
    /// 由源目录推导目标目录
    ///
    /// 去掉 `input_root` 前缀，剩余相对路径拼接到 `output_folder` 下。
    pub fn resolve(input_root: &Path, source: &Path, output_folder: &Path) -> Self {
        let relative = source.strip_prefix(input_root).unwrap_or(Path::new(""));
        let dest = if relative.as_os_str().is_empty() {
            output_folder.to_path_buf()
        } else {
            output_folder.join(relative)
        };
        WorkItem {
            source: source.to_path_buf(),
            dest,
        }
    }
}

/// 单个作业的最终结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// 成功
    Succeeded,
    /// 失败（原因）
    Failed(String),
    /// 因停止信号而取消
    Cancelled,
}

impl JobOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, JobOutcome::Failed(_))
    }
}

impl std::fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobOutcome::Succeeded => write!(f, "succeeded"),
            JobOutcome::Failed(reason) => write!(f, "failed: {}", reason),
            JobOutcome::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// 批次整体状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    AllSucceeded,
    CompletedWithErrors,
    Cancelled,
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchStatus::AllSucceeded => write!(f, "all succeeded"),
            BatchStatus::CompletedWithErrors => write!(f, "completed with errors"),
            BatchStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// 已执行作业的记录
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub item: WorkItem,
    pub outcome: JobOutcome,
    /// 元数据复制失败的文件数
    pub metadata_failures: usize,
}

/// 批次结果
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// 批次输出目录
    pub output_folder: PathBuf,
    /// 按执行顺序排列的作业记录
    pub jobs: Vec<JobRecord>,
    /// 是否有作业失败
    pub encountered_error: bool,
    /// 批次运行期间是否收到停止信号
    pub stopped_early: bool,
}

impl BatchResult {
    /// 收到停止信号或有作业被取消时为 `Cancelled`，优先于失败
    pub fn status(&self) -> BatchStatus {
        let cancelled = self
            .jobs
            .iter()
            .any(|j| j.outcome == JobOutcome::Cancelled);
        if self.stopped_early || cancelled {
            BatchStatus::Cancelled
        } else if self.encountered_error {
            BatchStatus::CompletedWithErrors
        } else {
            BatchStatus::AllSucceeded
        }
    }

    /// 成功作业数
    pub fn succeeded(&self) -> usize {
        self.jobs
            .iter()
            .filter(|j| j.outcome == JobOutcome::Succeeded)
            .count()
    }

    /// 失败作业数
    pub fn failed(&self) -> usize {
        self.jobs.iter().filter(|j| j.outcome.is_failed()).count()
    }
}
