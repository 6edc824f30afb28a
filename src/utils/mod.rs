//! # 工具函数模块
//!
//! 提供美化输出、进度条、日志初始化以及终端事件接收端。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 子模块: console, logging, output, progress

pub mod console;
pub mod logging;
pub mod output;
pub mod progress;
