//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `batch`: 批量放大目录（可递归）
//! - `models`: 列出可用模型
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: batch, models

pub mod batch;
pub mod models;

use clap::{ArgAction, Parser, Subcommand};

/// upscayl-batch - upscayl-bin 批量放大驱动
#[derive(Parser)]
#[command(name = "upscayl-batch")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Sequential batch driver for the upscayl-bin image upscaler", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v warn, -vv info, -vvv debug, -vvvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Upscale every image in a folder (optionally recursively) with upscayl-bin
    Batch(batch::BatchArgs),

    /// List built-in and custom upscaling models
    Models(models::ModelsArgs),
}
