//! # upscayl-batch - upscayl-bin 批量放大驱动
//!
//! 对一个输入目录（可递归）逐个目录调用外部放大程序，
//! 顺序执行、可取消，并汇总每个目录的结果。
//!
//! ## 子命令
//! - `batch`  - 批量放大目录
//! - `models` - 列出可用模型
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (目录展开、作业执行、编排)
//!   │     ├── upscayl/   (外部进程与元数据工具)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (输出、进度条、日志)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod upscayl;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::logging::init(cli.verbose);

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
