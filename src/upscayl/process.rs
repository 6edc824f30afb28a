//! # 子进程启动与输出读取
//!
//! 启动 upscayl-bin 并把 stderr 行与进程退出合并为一个有序事件序列。
//!
//! ## 功能
//! - `ProcessSpawner` / `UpscaylProcess` trait，便于作业执行器替换实现
//! - 基于 `std::process` 的真实实现：读取线程逐行读取 stderr，经 `mpsc` 通道转发
//!   （只去掉行尾换行，空行也原样转发）
//! - `KillHandle` 可跨线程终止进程，供进程注册表使用
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 使用
//! - 被 `commands/batch.rs` 构造

use crate::error::{Result, UpscaleError};

use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// 退出轮询间隔
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// 子进程事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    /// 一行诊断输出
    Line(String),
    /// 进程退出（退出码，被信号终止时为 None）
    Exited(Option<i32>),
    /// 进程级错误（读取输出或等待失败）
    Error(String),
}

/// 可跨线程终止进程的句柄
pub trait KillHandle: Send + Sync {
    fn kill(&self) -> std::io::Result<()>;
}

/// 运行中的放大进程
pub trait UpscaylProcess {
    /// 进程 ID
    fn id(&self) -> u32;

    /// 阻塞等待下一个事件；`Exited` 之后不再调用
    fn next_event(&mut self) -> ProcessEvent;

    /// 终止进程并回收
    fn kill(&mut self) -> std::io::Result<()>;

    /// 供注册表使用的终止句柄
    fn kill_handle(&self) -> Arc<dyn KillHandle>;
}

/// 进程启动器
pub trait ProcessSpawner {
    fn spawn(&self, args: &[String]) -> Result<Box<dyn UpscaylProcess>>;
}

// ─────────────────────────────────────────────────────────────
// std::process 实现
// ─────────────────────────────────────────────────────────────

/// 通过 `std::process::Command` 启动外部程序
pub struct CommandSpawner {
    program: PathBuf,
}

impl CommandSpawner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ProcessSpawner for CommandSpawner {
    fn spawn(&self, args: &[String]) -> Result<Box<dyn UpscaylProcess>> {
        debug!(program = %self.program.display(), ?args, "spawning upscaler");

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| UpscaleError::Launch {
                program: self.program.display().to_string(),
                source: e,
            })?;

        let id = child.id();
        let stderr = child.stderr.take().ok_or_else(|| {
            UpscaleError::Other(format!("Failed to capture stderr of process {}", id))
        })?;

        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name(format!("upscayl-stderr-{}", id))
            .spawn(move || {
                let mut reader = BufReader::new(stderr);
                let mut buf = Vec::new();
                loop {
                    buf.clear();
                    match reader.read_until(b'\n', &mut buf) {
                        Ok(0) => break,
                        Ok(_) => {
                            let line = String::from_utf8_lossy(&buf);
                            let line = line.trim_end_matches(['\r', '\n']);
                            if tx.send(Ok(line.to_string())).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            let _ = tx.send(Err(e));
                            break;
                        }
                    }
                }
            })
            .map_err(|e| UpscaleError::Other(format!("Failed to start reader thread: {}", e)))?;

        Ok(Box::new(ChildProcess {
            id,
            child: Arc::new(Mutex::new(child)),
            lines: rx,
            stream_closed: false,
        }))
    }
}

/// 包装 `std::process::Child`
struct ChildProcess {
    id: u32,
    child: Arc<Mutex<Child>>,
    lines: Receiver<std::io::Result<String>>,
    stream_closed: bool,
}

impl ChildProcess {
    /// 轮询等待退出，不在阻塞期间持有锁，以便注册表随时终止进程
    fn poll_exit(&self) -> ProcessEvent {
        loop {
            let status = {
                let mut child = self.child.lock().unwrap_or_else(|e| e.into_inner());
                child.try_wait()
            };
            match status {
                Ok(Some(status)) => return ProcessEvent::Exited(status.code()),
                Ok(None) => thread::sleep(EXIT_POLL_INTERVAL),
                Err(e) => return ProcessEvent::Error(e.to_string()),
            }
        }
    }
}

impl UpscaylProcess for ChildProcess {
    fn id(&self) -> u32 {
        self.id
    }

    fn next_event(&mut self) -> ProcessEvent {
        if !self.stream_closed {
            match self.lines.recv() {
                Ok(Ok(line)) => return ProcessEvent::Line(line),
                Ok(Err(e)) => {
                    self.stream_closed = true;
                    return ProcessEvent::Error(e.to_string());
                }
                // 读取线程结束：stderr 已关闭
                Err(_) => self.stream_closed = true,
            }
        }
        self.poll_exit()
    }

    fn kill(&mut self) -> std::io::Result<()> {
        let mut child = self.child.lock().unwrap_or_else(|e| e.into_inner());
        child.kill()?;
        child.wait().map(|_| ())
    }

    fn kill_handle(&self) -> Arc<dyn KillHandle> {
        Arc::new(ChildKiller {
            child: Arc::clone(&self.child),
        })
    }
}

/// 注册表持有的终止句柄
struct ChildKiller {
    child: Arc<Mutex<Child>>,
}

impl KillHandle for ChildKiller {
    fn kill(&self) -> std::io::Result<()> {
        let mut child = self.child.lock().unwrap_or_else(|e| e.into_inner());
        child.kill()
    }
}
