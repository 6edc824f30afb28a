//! # 批处理上下文
//!
//! 调用方持有的编排上下文，取代全局可变状态。
//!
//! ## 功能
//! - 停止信号（原子布尔值，可从任意线程设置）
//! - 存活进程注册表，`kill_all` 终止所有已注册的子进程
//!
//! ## 依赖关系
//! - 被 `batch/orchestrator.rs`, `batch/runner.rs` 使用
//! - 被 `commands/batch.rs` 的 Ctrl-C 处理器使用

use crate::upscayl::KillHandle;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// 注册表中的进程编号
pub type ProcessId = u64;

/// 编排上下文
#[derive(Default)]
pub struct BatchContext {
    stopped: AtomicBool,
    next_id: AtomicU64,
    processes: Mutex<BTreeMap<ProcessId, Arc<dyn KillHandle>>>,
}

impl BatchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求停止：不再启动新的作业
    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// 批次开始时清除停止信号
    pub fn reset(&self) {
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// 登记存活进程
    pub fn register_process(&self, handle: Arc<dyn KillHandle>) -> ProcessId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.registry().insert(id, handle);
        id
    }

    /// 进程结束后注销
    pub fn unregister_process(&self, id: ProcessId) {
        self.registry().remove(&id);
    }

    /// 当前存活进程数
    pub fn live_processes(&self) -> usize {
        self.registry().len()
    }

    /// 终止所有已登记的进程，返回成功发送终止信号的数量
    pub fn kill_all(&self) -> usize {
        // 先取出句柄再终止，避免持锁期间执行系统调用
        let handles: Vec<(ProcessId, Arc<dyn KillHandle>)> = self
            .registry()
            .iter()
            .map(|(id, h)| (*id, Arc::clone(h)))
            .collect();

        let mut killed = 0;
        for (id, handle) in handles {
            match handle.kill() {
                Ok(()) => {
                    debug!(process = id, "killed upscaler process");
                    killed += 1;
                }
                Err(e) => warn!(process = id, error = %e, "failed to kill upscaler process"),
            }
        }
        killed
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, BTreeMap<ProcessId, Arc<dyn KillHandle>>> {
        self.processes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// 进程登记守卫，离开作用域时自动注销
pub struct Registration<'a> {
    ctx: &'a BatchContext,
    id: ProcessId,
}

impl<'a> Registration<'a> {
    pub fn new(ctx: &'a BatchContext, handle: Arc<dyn KillHandle>) -> Self {
        let id = ctx.register_process(handle);
        Self { ctx, id }
    }
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.ctx.unregister_process(self.id);
    }
}
