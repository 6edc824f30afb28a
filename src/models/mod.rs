//! # 数据模型模块
//!
//! 定义批量放大请求、作业和结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `batch/`、`upscayl/` 和 `commands/` 使用
//! - 子模块: request, job, catalog

pub mod catalog;
pub mod job;
pub mod request;

pub use job::{BatchResult, BatchStatus, JobOutcome, JobRecord, WorkItem};
pub use request::{BatchRequest, ModelPaths, OutputFormat, UpscaleParams};
