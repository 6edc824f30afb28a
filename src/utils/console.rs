//! # 终端事件接收端与通知
//!
//! 把批处理事件渲染为进度条和彩色消息。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 构造
//! - 使用 `utils/output.rs`, `utils/progress.rs`
//! - 使用 `console` 判断是否为交互终端

use crate::batch::{BatchEvent, EventSink, Notifier};
use crate::models::JobOutcome;
use crate::utils::{output, progress};

use indicatif::ProgressBar;
use std::sync::Mutex;
use tracing::debug;

/// 当前作业的显示状态
struct ActiveJob {
    bar: ProgressBar,
    label: String,
}

/// 终端事件接收端
pub struct ConsoleSink {
    interactive: bool,
    active: Mutex<Option<ActiveJob>>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::with_interactive(console::Term::stderr().is_term())
    }

    /// 非交互模式下不绘制进度条，只打印开始行
    fn with_interactive(interactive: bool) -> Self {
        Self {
            interactive,
            active: Mutex::new(None),
        }
    }

    /// 在进度条暂停期间打印，避免输出交错
    fn print(&self, f: impl FnOnce()) {
        let active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        match active.as_ref() {
            Some(job) => job.bar.suspend(f),
            None => f(),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for ConsoleSink {
    fn emit(&self, event: BatchEvent) {
        match event {
            BatchEvent::JobStarted {
                index,
                total,
                source,
            } => {
                let label = format!("[{}/{}] {}", index + 1, total, source.display());
                let bar = if self.interactive {
                    progress::create_job_bar(&label)
                } else {
                    output::print_info(&format!("Upscaling {}", label));
                    ProgressBar::hidden()
                };
                let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
                if let Some(prev) = active.replace(ActiveJob { bar, label }) {
                    prev.bar.finish_and_clear();
                }
            }
            BatchEvent::Progress(line) => match progress::parse_percent(&line) {
                Some(pct) => {
                    let active = self.active.lock().unwrap_or_else(|e| e.into_inner());
                    if let Some(job) = active.as_ref() {
                        job.bar.set_position(pct);
                    }
                }
                None => debug!(target: "upscayl_batch::upscaler", "{}", line),
            },
            BatchEvent::Converting => {
                let active = self.active.lock().unwrap_or_else(|e| e.into_inner());
                if let Some(job) = active.as_ref() {
                    job.bar.set_message("scaling and converting");
                }
            }
            BatchEvent::JobError(msg) => self.print(|| output::print_error(&msg)),
            BatchEvent::MetadataError(msg) => {
                self.print(|| output::print_warning(&format!("Metadata: {}", msg)))
            }
            BatchEvent::JobFinished { outcome, .. } => {
                let job = self
                    .active
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .take();
                let label = match job {
                    Some(job) => {
                        job.bar.finish_and_clear();
                        job.label
                    }
                    None => String::new(),
                };
                match outcome {
                    JobOutcome::Succeeded => output::print_success(&label),
                    JobOutcome::Failed(_) => output::print_error(&format!("{} failed", label)),
                    JobOutcome::Cancelled => output::print_skip(&format!("{} cancelled", label)),
                }
            }
            BatchEvent::Done(path) => {
                output::print_separator();
                output::print_done(&format!("Output folder: {}", path.display()));
            }
        }
    }
}

/// 终端通知
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, body: &str) {
        output::print_notification(title, body);
    }
}
