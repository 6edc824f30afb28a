//! # 统一错误处理模块
//!
//! 定义 upscayl-batch 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - I/O 错误：目录读取/创建失败（批处理开始前中止整个批次，或仅中止单个作业）
//! - 启动错误：外部进程无法启动（仅该作业失败）
//! - 进程错误：诊断输出命中致命模式或异常退出（仅该作业失败）
//! - 元数据错误：单文件元数据复制失败（只记录，不影响作业状态）
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// upscayl-batch 统一错误类型
#[derive(Error, Debug)]
pub enum UpscaleError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Failed to read directory: {path}")]
    DirectoryRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory: {path}")]
    DirectoryCreate {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 外部进程错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to launch '{program}'")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Upscaler process failed: {0}")]
    Process(String),

    #[error("Failed to copy metadata to {path}: {reason}")]
    Metadata { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, UpscaleError>;
