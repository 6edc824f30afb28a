//! # 作业执行器
//!
//! 为单个 (输入目录, 输出目录) 启动 upscayl-bin，分类其输出并得出作业结果。
//!
//! ## 功能
//! - 创建输出目录
//! - 启动子进程并登记到上下文的进程注册表
//! - 逐行分类诊断输出：致命错误 / 转换阶段 / 原始进度
//! - 命中致命错误时终止子进程
//!
//! 错误判断是纯子串匹配：任何包含 "Error" 或 "failed" 的行都视为致命。
//!
//! ## 依赖关系
//! - 被 `batch/orchestrator.rs` 调用
//! - 使用 `upscayl/args.rs` 构造参数，`upscayl/process.rs` 启动进程

use super::context::{BatchContext, Registration};
use super::events::{BatchEvent, EventSink};
use crate::error::{Result, UpscaleError};
use crate::models::{JobOutcome, UpscaleParams, WorkItem};
use crate::upscayl::{build_batch_args, ProcessEvent, ProcessSpawner, UpscaylProcess};

use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// 输出行分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// 致命错误
    Fatal,
    /// 缩放/转换阶段
    Converting,
    /// 其他进度文本
    Progress,
}

/// 按优先级分类一行诊断输出
pub fn classify_line(line: &str) -> LineKind {
    if line.contains("Error") || line.contains("failed") {
        LineKind::Fatal
    } else if line.contains("Resizing") {
        LineKind::Converting
    } else {
        LineKind::Progress
    }
}

/// 作业执行器
pub struct JobRunner<'a> {
    spawner: &'a dyn ProcessSpawner,
}

impl<'a> JobRunner<'a> {
    pub fn new(spawner: &'a dyn ProcessSpawner) -> Self {
        Self { spawner }
    }

    /// 执行单个作业，阻塞直到子进程结束或被终止
    ///
    /// 仅在输出目录无法创建时返回 `Err`；其余失败均转换为 `JobOutcome::Failed`。
    pub fn run(
        &self,
        item: &WorkItem,
        params: &UpscaleParams,
        models_path: &Path,
        ctx: &BatchContext,
        sink: &dyn EventSink,
    ) -> Result<JobOutcome> {
        if ctx.is_stopped() {
            return Ok(JobOutcome::Cancelled);
        }

        if !item.dest.exists() {
            fs::create_dir_all(&item.dest).map_err(|e| UpscaleError::DirectoryCreate {
                path: item.dest.display().to_string(),
                source: e,
            })?;
        }

        let args = build_batch_args(&item.source, &item.dest, models_path, params);
        let mut process = match self.spawner.spawn(&args) {
            Ok(p) => p,
            Err(e) => {
                let reason = e.to_string();
                info!(source = %item.source.display(), error = %reason, "failed to launch upscaler");
                sink.emit(BatchEvent::JobError(format!(
                    "Error upscaling images! {}",
                    reason
                )));
                return Ok(JobOutcome::Failed(reason));
            }
        };

        info!(
            pid = process.id(),
            source = %item.source.display(),
            dest = %item.dest.display(),
            "upscaling directory"
        );
        let _registration = Registration::new(ctx, process.kill_handle());

        Ok(watch(process.as_mut(), ctx, sink))
    }
}

/// 消费进程事件直到得出结果
fn watch(process: &mut dyn UpscaylProcess, ctx: &BatchContext, sink: &dyn EventSink) -> JobOutcome {
    loop {
        match process.next_event() {
            ProcessEvent::Line(line) => {
                sink.emit(BatchEvent::Progress(line.clone()));
                match classify_line(&line) {
                    LineKind::Fatal => {
                        info!(pid = process.id(), line = %line, "upscaler reported an error");
                        terminate(process);
                        sink.emit(BatchEvent::JobError(format!(
                            "Error upscaling images! {}",
                            line
                        )));
                        return JobOutcome::Failed(line);
                    }
                    LineKind::Converting => sink.emit(BatchEvent::Converting),
                    LineKind::Progress => {}
                }
            }
            ProcessEvent::Error(reason) => {
                info!(pid = process.id(), error = %reason, "upscaler process error");
                terminate(process);
                sink.emit(BatchEvent::Progress(reason.clone()));
                sink.emit(BatchEvent::JobError(format!(
                    "Error upscaling images! {}",
                    reason
                )));
                return JobOutcome::Failed(reason);
            }
            ProcessEvent::Exited(code) => {
                if ctx.is_stopped() {
                    info!(pid = process.id(), "upscaler exited after stop request");
                    return JobOutcome::Cancelled;
                }
                return match code {
                    Some(0) => {
                        debug!(pid = process.id(), "done upscaling");
                        JobOutcome::Succeeded
                    }
                    other => {
                        let reason = UpscaleError::Process(match other {
                            Some(code) => format!("exited with status {}", code),
                            None => "terminated by a signal".to_string(),
                        })
                        .to_string();
                        info!(pid = process.id(), "{}", reason);
                        sink.emit(BatchEvent::JobError(format!(
                            "Error upscaling images! {}",
                            reason
                        )));
                        JobOutcome::Failed(reason)
                    }
                };
            }
        }
    }
}

fn terminate(process: &mut dyn UpscaylProcess) {
    if let Err(e) = process.kill() {
        debug!(pid = process.id(), error = %e, "kill after failure returned an error");
    }
}
