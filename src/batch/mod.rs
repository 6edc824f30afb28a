//! # 批处理核心模块
//!
//! 驱动外部放大程序逐个处理目录。
//!
//! ## 功能
//! - 目录展开（可递归）
//! - 顺序执行作业，同一时刻只有一个子进程
//! - 协作式取消与进程注册表
//! - 可选的元数据后处理
//! - 错误汇总与完成通知
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 使用 `upscayl/` 启动进程与复制元数据
//! - 使用 `walkdir` 遍历目录

pub mod context;
pub mod events;
pub mod expander;
pub mod orchestrator;
pub mod post;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub use context::BatchContext;
pub use events::{BatchEvent, EventSink, Notifier};
pub use orchestrator::BatchOrchestrator;
