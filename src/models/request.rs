//! # 批量请求数据模型
//!
//! 一次批处理运行的全部输入参数，运行期间不可变。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 构造
//! - 被 `batch/orchestrator.rs`、`upscayl/args.rs` 使用

use super::catalog;

use std::path::{Path, PathBuf};

/// 输出图像格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpg,
    Webp,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "png"),
            OutputFormat::Jpg => write!(f, "jpg"),
            OutputFormat::Webp => write!(f, "webp"),
        }
    }
}

/// 模型目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    /// 内置模型目录
    pub builtin: PathBuf,
    /// 自定义模型目录
    pub custom: Option<PathBuf>,
}

impl ModelPaths {
    /// 选择模型所在目录
    ///
    /// 内置模型总是使用内置目录；其他模型优先使用自定义目录，未配置时回退到内置目录。
    pub fn resolve(&self, model: &str) -> &Path {
        if catalog::is_builtin(model) {
            return &self.builtin;
        }
        self.custom.as_deref().unwrap_or(&self.builtin)
    }
}

/// 放大参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpscaleParams {
    /// 放大倍数
    pub scale: u32,
    /// 自定义输出宽度（设置后覆盖 scale）
    pub custom_width: Option<u32>,
    /// 压缩等级 (0-100)
    pub compression: u8,
    /// 分块大小，0 表示自动
    pub tile_size: u32,
    /// test-time augmentation
    pub tta: bool,
    /// 模型标识
    pub model: String,
    /// 计算设备 ID
    pub gpu_id: Option<String>,
    /// 输出格式
    pub format: OutputFormat,
}

impl UpscaleParams {
    /// 批次输出文件夹名称
    ///
    /// 形如 `upscayl_png_upscayl-standard-4x_4x` 或 `upscayl_jpg_remacri-4x_1920px`。
    pub fn folder_name(&self) -> String {
        let size = match self.custom_width {
            Some(width) => format!("{}px", width),
            None => format!("{}x", self.scale),
        };
        format!("upscayl_{}_{}_{}", self.format, self.model, size)
    }
}

/// 批量放大请求
#[derive(Debug, Clone)]
pub struct BatchRequest {
    /// 输入根目录（绝对路径）
    pub input_root: PathBuf,
    /// 输出根目录（绝对路径）
    pub output_root: PathBuf,
    /// 放大参数
    pub params: UpscaleParams,
    /// 模型目录
    pub models: ModelPaths,
    /// 是否递归处理子目录
    pub recursive: bool,
    /// 是否复制元数据
    pub copy_metadata: bool,
}

impl BatchRequest {
    /// 本批次的输出目录：输出根目录下以参数命名的文件夹
    pub fn output_folder(&self) -> PathBuf {
        self.output_root.join(self.params.folder_name())
    }

    /// 当前模型对应的模型目录
    pub fn models_path(&self) -> &Path {
        self.models.resolve(&self.params.model)
    }
}
