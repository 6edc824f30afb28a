//! 测试用的假进程、事件接收端与元数据复制器

use super::context::BatchContext;
use super::events::{BatchEvent, EventSink, Notifier};
use crate::error::{Result, UpscaleError};
use crate::models::{OutputFormat, UpscaleParams};
use crate::upscayl::{KillHandle, MetadataCopier, ProcessEvent, ProcessSpawner, UpscaylProcess};

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn params() -> UpscaleParams {
    UpscaleParams {
        scale: 4,
        custom_width: None,
        compression: 0,
        tile_size: 0,
        tta: false,
        model: "upscayl-standard-4x".to_string(),
        gpu_id: None,
        format: OutputFormat::Png,
    }
}

/// 假进程的一步
pub enum Step {
    Event(ProcessEvent),
    /// 在产出下一个事件前设置停止信号
    RequestStop(Arc<BatchContext>),
}

/// 一次 spawn 的脚本
pub enum Script {
    LaunchError,
    /// 步骤耗尽后进程以状态 0 退出
    Steps(Vec<Step>),
}

impl Script {
    pub fn lines(lines: &[&str]) -> Self {
        Script::Steps(
            lines
                .iter()
                .map(|l| Step::Event(ProcessEvent::Line(l.to_string())))
                .collect(),
        )
    }

    pub fn events(events: Vec<ProcessEvent>) -> Self {
        Script::Steps(events.into_iter().map(Step::Event).collect())
    }
}

/// 按顺序为每次 spawn 返回脚本化的假进程
pub struct FakeSpawner {
    scripts: Mutex<VecDeque<Script>>,
    args: Mutex<Vec<Vec<String>>>,
    kills: Mutex<Vec<Arc<AtomicUsize>>>,
}

impl FakeSpawner {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into()),
            args: Mutex::new(Vec::new()),
            kills: Mutex::new(Vec::new()),
        }
    }

    /// 已启动（含启动失败）的次数
    pub fn spawned(&self) -> usize {
        self.args.lock().unwrap().len()
    }

    /// 第 `n` 次 spawn 的参数
    pub fn args(&self, n: usize) -> Vec<String> {
        self.args.lock().unwrap()[n].clone()
    }

    /// 第 `n` 个成功启动的进程被终止的次数
    pub fn kills(&self, n: usize) -> usize {
        self.kills.lock().unwrap()[n].load(Ordering::SeqCst)
    }
}

impl ProcessSpawner for FakeSpawner {
    fn spawn(&self, args: &[String]) -> Result<Box<dyn UpscaylProcess>> {
        self.args.lock().unwrap().push(args.to_vec());
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Script::Steps(Vec::new()));

        match script {
            Script::LaunchError => Err(UpscaleError::Launch {
                program: "upscayl-bin".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            }),
            Script::Steps(steps) => {
                let kills = Arc::new(AtomicUsize::new(0));
                self.kills.lock().unwrap().push(Arc::clone(&kills));
                let id = self.kills.lock().unwrap().len() as u32;
                Ok(Box::new(FakeProcess {
                    id,
                    steps: steps.into(),
                    kills,
                }))
            }
        }
    }
}

struct FakeProcess {
    id: u32,
    steps: VecDeque<Step>,
    kills: Arc<AtomicUsize>,
}

impl UpscaylProcess for FakeProcess {
    fn id(&self) -> u32 {
        self.id
    }

    fn next_event(&mut self) -> ProcessEvent {
        if self.kills.load(Ordering::SeqCst) > 0 {
            return ProcessEvent::Exited(None);
        }
        while let Some(step) = self.steps.pop_front() {
            match step {
                Step::Event(event) => return event,
                Step::RequestStop(ctx) => ctx.request_stop(),
            }
        }
        ProcessEvent::Exited(Some(0))
    }

    fn kill(&mut self) -> std::io::Result<()> {
        self.kills.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn kill_handle(&self) -> Arc<dyn KillHandle> {
        Arc::new(FakeKiller(Arc::clone(&self.kills)))
    }
}

struct FakeKiller(Arc<AtomicUsize>);

impl KillHandle for FakeKiller {
    fn kill(&self) -> std::io::Result<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// 记录所有事件，可选地在某个作业结束后请求停止
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<BatchEvent>>,
    stop_after: Option<(usize, Arc<BatchContext>)>,
}

impl RecordingSink {
    pub fn stop_after(index: usize, ctx: Arc<BatchContext>) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            stop_after: Some((index, ctx)),
        }
    }

    pub fn events(&self) -> Vec<BatchEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: BatchEvent) {
        if let (BatchEvent::JobFinished { index, .. }, Some((stop_index, ctx))) =
            (&event, &self.stop_after)
        {
            if index == stop_index {
                ctx.request_stop();
            }
        }
        self.events.lock().unwrap().push(event);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<(String, String)>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
    }
}

/// 记录调用；文件名以 "bad" 开头时失败
#[derive(Default)]
pub struct FakeCopier {
    pub calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl MetadataCopier for FakeCopier {
    fn copy_metadata(&self, source_dir: &Path, dest_file: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((source_dir.to_path_buf(), dest_file.to_path_buf()));
        let name = dest_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if name.starts_with("bad") {
            return Err(UpscaleError::Metadata {
                path: dest_file.display().to_string(),
                reason: "unsupported file".to_string(),
            });
        }
        Ok(())
    }
}
