//! # 进度条工具
//!
//! 封装 `indicatif` 提供统一的进度条样式。
//!
//! ## 依赖关系
//! - 被 `utils/console.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};

/// 创建单个作业的百分比进度条
///
/// `prefix` 显示目录序号与路径，`msg` 显示当前阶段。
pub fn create_job_bar(prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} {prefix} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_prefix(prefix.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// 把诊断行中的百分比（如 `12.50%`）解析为整数进度
pub fn parse_percent(line: &str) -> Option<u64> {
    use regex::Regex;
    use std::sync::OnceLock;

    static PERCENT: OnceLock<Option<Regex>> = OnceLock::new();
    let re = PERCENT
        .get_or_init(|| Regex::new(r"^\s*(\d{1,3}(?:\.\d+)?)%\s*$").ok())
        .as_ref()?;

    let caps = re.captures(line)?;
    let value: f64 = caps[1].parse().ok()?;
    Some(value.clamp(0.0, 100.0) as u64)
}
