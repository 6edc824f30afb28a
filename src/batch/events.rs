//! # 批处理事件
//!
//! 编排器向界面层发送的离散事件，以及通知接口。
//!
//! ## 依赖关系
//! - 被 `batch/` 各组件发送
//! - 由 `commands/batch.rs` 中的终端实现消费

use crate::models::JobOutcome;

use std::path::PathBuf;

/// 通知标题
pub const NOTIFY_TITLE: &str = "Upscayled";
/// 全部成功时的通知内容
pub const NOTIFY_SUCCESS: &str = "Images upscayled successfully!";
/// 存在失败作业时的通知内容
pub const NOTIFY_WITH_ERRORS: &str = "Images were upscayled but encountered some errors!";

/// 进度事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// 开始处理第 `index` 个目录（从 0 开始）
    JobStarted {
        index: usize,
        total: usize,
        source: PathBuf,
    },
    /// 原始进度文本
    Progress(String),
    /// 进入缩放/转换阶段
    Converting,
    /// 作业级错误
    JobError(String),
    /// 第 `index` 个作业结束
    JobFinished { index: usize, outcome: JobOutcome },
    /// 单文件元数据复制失败
    MetadataError(String),
    /// 批次结束，携带输出目录
    Done(PathBuf),
}

/// 事件接收端
pub trait EventSink {
    fn emit(&self, event: BatchEvent);
}

/// 桌面/终端通知
pub trait Notifier {
    fn notify(&self, title: &str, body: &str);
}
