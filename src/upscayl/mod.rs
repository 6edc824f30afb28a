//! # upscayl-bin 外部协作模块
//!
//! 封装与外部放大程序和元数据工具的交互。
//!
//! ## 功能
//! - 构造 upscayl-bin 批处理参数
//! - 启动子进程并逐行读取诊断输出
//! - 通过 exiftool 复制元数据
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/batch.rs` 使用
//! - 子模块: args, process, metadata

pub mod args;
pub mod metadata;
pub mod process;

pub use args::build_batch_args;
pub use metadata::{ExiftoolCopier, MetadataCopier};
pub use process::{CommandSpawner, KillHandle, ProcessEvent, ProcessSpawner, UpscaylProcess};
