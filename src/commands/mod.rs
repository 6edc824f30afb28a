//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `upscayl/`, `utils/`
//! - 子模块: batch, models

pub mod batch;
pub mod models;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Batch(args) => batch::execute(args),
        Commands::Models(args) => models::execute(args),
    }
}
