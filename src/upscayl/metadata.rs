//! # 元数据复制
//!
//! 把源图像的非像素元数据复制到放大后的文件。
//!
//! ## 依赖关系
//! - 被 `batch/post.rs` 使用
//! - 真实实现调用外部 `exiftool`

use crate::error::{Result, UpscaleError};

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 元数据复制原语
pub trait MetadataCopier {
    /// 从 `source_dir` 中同名源文件复制元数据到 `dest_file`
    fn copy_metadata(&self, source_dir: &Path, dest_file: &Path) -> Result<()>;
}

/// 基于 exiftool 的实现
pub struct ExiftoolCopier {
    program: PathBuf,
}

impl ExiftoolCopier {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl MetadataCopier for ExiftoolCopier {
    fn copy_metadata(&self, source_dir: &Path, dest_file: &Path) -> Result<()> {
        let file_name = dest_file.file_name().ok_or_else(|| UpscaleError::Metadata {
            path: dest_file.display().to_string(),
            reason: "destination has no file name".to_string(),
        })?;
        let source_file = source_dir.join(file_name);

        let output = Command::new(&self.program)
            .arg("-TagsFromFile")
            .arg(&source_file)
            .arg("-all:all")
            .arg("-overwrite_original")
            .arg(dest_file)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| UpscaleError::Launch {
                program: self.program.display().to_string(),
                source: e,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(UpscaleError::Metadata {
                path: dest_file.display().to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
