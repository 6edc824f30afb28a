//! # 日志初始化
//!
//! 诊断日志使用 `tracing`，输出到 stderr；用户可见信息仍走 `utils/output.rs`。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `tracing-subscriber`

use tracing_subscriber::EnvFilter;

/// 根据 `-v` 次数初始化日志；设置了 `RUST_LOG` 时以其为准
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // 重复初始化（例如测试中）时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 默认过滤指令
///
/// 不加 `-v` 时只输出 error：作业失败已由终端打印，且日志会打断进度条。
fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    format!("upscayl_batch={}", level)
}
