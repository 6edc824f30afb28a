//! # models 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/models.rs`

use clap::Args;
use std::path::PathBuf;

/// models 子命令参数
#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Folder containing custom models (*.param / *.bin pairs)
    #[arg(long, env = "UPSCAYL_CUSTOM_MODELS_PATH")]
    pub custom_models_path: Option<PathBuf>,
}
