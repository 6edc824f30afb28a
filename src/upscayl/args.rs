//! # upscayl-bin 参数构造
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 使用
//! - 使用 `models/request.rs` 中的参数

use crate::models::UpscaleParams;

use std::path::Path;

/// 构造目录批处理参数
///
/// 可选参数（GPU、分块大小、TTA）仅在设置时出现。
pub fn build_batch_args(
    input_dir: &Path,
    output_dir: &Path,
    models_path: &Path,
    params: &UpscaleParams,
) -> Vec<String> {
    let mut args = vec![
        "-i".to_string(),
        input_dir.display().to_string(),
        "-o".to_string(),
        output_dir.display().to_string(),
    ];

    match params.custom_width {
        Some(width) => {
            args.push("-w".to_string());
            args.push(width.to_string());
        }
        None => {
            args.push("-s".to_string());
            args.push(params.scale.to_string());
        }
    }

    args.push("-c".to_string());
    args.push(params.compression.to_string());
    args.push("-m".to_string());
    args.push(models_path.display().to_string());
    args.push("-n".to_string());
    args.push(params.model.clone());

    if let Some(ref gpu) = params.gpu_id {
        args.push("-g".to_string());
        args.push(gpu.clone());
    }

    args.push("-f".to_string());
    args.push(params.format.to_string());

    if params.tile_size > 0 {
        args.push("-t".to_string());
        args.push(params.tile_size.to_string());
    }

    if params.tta {
        args.push("-x".to_string());
    }

    args
}
