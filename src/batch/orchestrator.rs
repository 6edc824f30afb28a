//! # 批处理编排器
//!
//! 依次处理展开后的目录列表，汇总作业结果并发出完成事件与通知。
//!
//! ## 流程
//! 1. 清除停止信号，展开目录（失败则在任何作业开始前中止）
//! 2. 逐个目录：若已请求停止则跳出；否则执行作业，成功且需要时复制元数据
//! 3. 循环结束后发出 `Done` 事件，再按是否出现失败发送通知
//!
//! 同一时刻最多只有一个子进程存活。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `batch/expander.rs`, `batch/runner.rs`, `batch/post.rs`

use super::context::BatchContext;
use super::events::{
    BatchEvent, EventSink, Notifier, NOTIFY_SUCCESS, NOTIFY_TITLE, NOTIFY_WITH_ERRORS,
};
use super::expander;
use super::post::PostProcessor;
use super::runner::JobRunner;
use crate::error::Result;
use crate::models::{BatchRequest, BatchResult, JobOutcome, JobRecord, WorkItem};
use crate::upscayl::{MetadataCopier, ProcessSpawner};

use std::sync::Arc;
use tracing::info;

/// 批处理编排器
pub struct BatchOrchestrator<'a> {
    spawner: &'a dyn ProcessSpawner,
    copier: &'a dyn MetadataCopier,
    sink: &'a dyn EventSink,
    notifier: &'a dyn Notifier,
    ctx: Arc<BatchContext>,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(
        spawner: &'a dyn ProcessSpawner,
        copier: &'a dyn MetadataCopier,
        sink: &'a dyn EventSink,
        notifier: &'a dyn Notifier,
        ctx: Arc<BatchContext>,
    ) -> Self {
        Self {
            spawner,
            copier,
            sink,
            notifier,
            ctx,
        }
    }

    /// 执行整个批次
    ///
    /// 只有目录展开失败会返回 `Err`，此时不会启动任何作业，也不会发出 `Done`。
    pub fn run(&self, request: &BatchRequest) -> Result<BatchResult> {
        self.ctx.reset();

        let dirs = expander::expand(&request.input_root, request.recursive)?;
        let output_folder = request.output_folder();
        let models_path = request.models_path();
        let runner = JobRunner::new(self.spawner);
        let post = PostProcessor::new(self.copier);

        info!(
            input = %request.input_root.display(),
            output = %output_folder.display(),
            dirs = dirs.len(),
            "starting batch"
        );

        let total = dirs.len();
        let mut jobs = Vec::with_capacity(total);
        let mut encountered_error = false;
        let mut stopped_early = false;

        for (index, dir) in dirs.iter().enumerate() {
            if self.ctx.is_stopped() {
                info!(skipped = total - index, "stop requested, skipping remaining directories");
                stopped_early = true;
                break;
            }

            let item = WorkItem::resolve(&request.input_root, dir, &output_folder);
            self.sink.emit(BatchEvent::JobStarted {
                index,
                total,
                source: item.source.clone(),
            });

            let outcome = match runner.run(&item, &request.params, models_path, &self.ctx, self.sink)
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    info!(dest = %item.dest.display(), error = %e, "job aborted");
                    self.sink
                        .emit(BatchEvent::JobError(format!("Error upscaling images! {}", e)));
                    JobOutcome::Failed(e.to_string())
                }
            };

            if outcome.is_failed() {
                encountered_error = true;
            }

            let mut metadata_failures = 0;
            if outcome == JobOutcome::Succeeded && request.copy_metadata {
                metadata_failures = post
                    .copy_all(&item.source, &item.dest, self.sink)
                    .iter()
                    .filter(|o| o.result.is_err())
                    .count();
            }

            self.sink.emit(BatchEvent::JobFinished {
                index,
                outcome: outcome.clone(),
            });
            jobs.push(JobRecord {
                item,
                outcome,
                metadata_failures,
            });
        }

        // 最后一个作业运行期间收到的停止信号
        if self.ctx.is_stopped() {
            stopped_early = true;
        }

        self.sink.emit(BatchEvent::Done(output_folder.clone()));

        let body = if encountered_error {
            NOTIFY_WITH_ERRORS
        } else {
            NOTIFY_SUCCESS
        };
        self.notifier.notify(NOTIFY_TITLE, body);

        Ok(BatchResult {
            output_folder,
            jobs,
            encountered_error,
            stopped_early,
        })
    }
}
