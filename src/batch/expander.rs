//! # 目录展开
//!
//! 根据输入根目录和递归标志生成待处理目录列表。
//!
//! ## 功能
//! - 非递归：仅返回根目录
//! - 递归：深度优先先序遍历，目录总在其子目录之前、父目录之后
//! - 同级目录按文件名排序，保证顺序稳定
//!
//! ## 依赖关系
//! - 被 `batch/orchestrator.rs` 调用
//! - 使用 `walkdir` 遍历目录

use crate::error::{Result, UpscaleError};

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 展开待处理目录
///
/// 根目录总是第一个元素。根目录不存在或不可读时返回错误。
/// 不跟随符号链接。
pub fn expand(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(UpscaleError::DirectoryNotFound {
            path: root.display().to_string(),
        });
    }

    // 确认根目录可读
    fs::read_dir(root).map_err(|e| UpscaleError::DirectoryRead {
        path: root.display().to_string(),
        source: e,
    })?;

    if !recursive {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .unwrap_or(root)
                .display()
                .to_string();
            UpscaleError::DirectoryRead {
                path,
                source: e.into(),
            }
        })?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    Ok(dirs)
}
