//! # batch 子命令 CLI 定义
//!
//! 批量放大目录中的图像
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use crate::models::catalog::DEFAULT_MODEL;
use crate::models::OutputFormat;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 输出图像格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SaveFormat {
    /// PNG
    Png,
    /// JPEG
    Jpg,
    /// WebP
    Webp,
}

impl From<SaveFormat> for OutputFormat {
    fn from(f: SaveFormat) -> Self {
        match f {
            SaveFormat::Png => OutputFormat::Png,
            SaveFormat::Jpg => OutputFormat::Jpg,
            SaveFormat::Webp => OutputFormat::Webp,
        }
    }
}

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Folder containing the images to upscale
    pub input: PathBuf,

    /// Folder in which the output folder is created
    pub output: PathBuf,

    /// Also process every subfolder, mirroring the folder tree in the output
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Copy image metadata from each source file to its upscaled counterpart
    #[arg(long, default_value_t = false)]
    pub copy_metadata: bool,

    /// Write a per-folder CSV report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────
    // Upscaling options
    // ─────────────────────────────────────────────────────────────
    /// Model name
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Scale factor
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: u32,

    /// Custom output width in pixels (overrides --scale)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Output compression level (0-100)
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub compression: u8,

    /// Tile size, 0 for automatic
    #[arg(short, long, default_value_t = 0)]
    pub tile_size: u32,

    /// Enable test-time augmentation
    #[arg(short = 'x', long, default_value_t = false)]
    pub tta: bool,

    /// GPU device id (e.g. '0', '1' or '0,1,2')
    #[arg(short, long)]
    pub gpu_id: Option<String>,

    /// Output image format
    #[arg(short, long, value_enum, default_value = "png")]
    pub format: SaveFormat,

    // ─────────────────────────────────────────────────────────────
    // External tools
    // ─────────────────────────────────────────────────────────────
    /// Path to the upscayl-bin executable
    #[arg(long, env = "UPSCAYL_BIN", default_value = "upscayl-bin")]
    pub upscayl_bin: PathBuf,

    /// Folder containing the built-in models
    #[arg(long, env = "UPSCAYL_MODELS_PATH", default_value = "models")]
    pub models_path: PathBuf,

    /// Folder containing custom models
    #[arg(long, env = "UPSCAYL_CUSTOM_MODELS_PATH")]
    pub custom_models_path: Option<PathBuf>,

    /// Path to the exiftool executable used by --copy-metadata
    #[arg(long, env = "UPSCAYL_EXIFTOOL", default_value = "exiftool")]
    pub exiftool: PathBuf,
}
