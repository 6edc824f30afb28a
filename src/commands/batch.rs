//! # batch 命令实现
//!
//! 批量调用 upscayl-bin 放大目录中的图像。
//!
//! ## 功能
//! - 校验输入目录并构造批量请求
//! - 安装 Ctrl-C 处理器：停止批次并终止所有子进程
//! - 运行编排器，终端显示进度
//! - 打印汇总表格，可选写出 CSV 报告
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的参数
//! - 使用 `batch/`, `upscayl/`
//! - 使用 `utils/output.rs`, `utils/console.rs`

use crate::batch::{BatchContext, BatchOrchestrator};
use crate::cli::batch::BatchArgs;
use crate::error::{Result, UpscaleError};
use crate::models::{BatchRequest, BatchResult, BatchStatus, ModelPaths, UpscaleParams};
use crate::upscayl::{CommandSpawner, ExiftoolCopier};
use crate::utils::console::{ConsoleNotifier, ConsoleSink};
use crate::utils::output;

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tabled::{Table, Tabled};

/// 汇总行（终端表格与 CSV 共用）
#[derive(Debug, Clone, Serialize, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Folder")]
    folder: String,
    #[tabled(rename = "Output")]
    output: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Metadata errors")]
    metadata_failures: usize,
}

/// 执行 batch 命令
pub fn execute(args: BatchArgs) -> Result<()> {
    output::print_header("Batch Upscale");

    let request = build_request(&args)?;

    output::print_info(&format!("Input:  {}", request.input_root.display()));
    output::print_info(&format!("Output: {}", request.output_folder().display()));
    output::print_info(&format!(
        "Model:  {} ({})",
        request.params.model,
        request.models_path().display()
    ));
    if request.recursive {
        output::print_info("Recursive mode: subfolders will be processed");
    }

    let ctx = Arc::new(BatchContext::new());
    let handler_ctx = Arc::clone(&ctx);
    ctrlc::set_handler(move || {
        handler_ctx.request_stop();
        let live = handler_ctx.live_processes();
        let killed = handler_ctx.kill_all();
        output::print_warning(&format!(
            "Stop requested, killed {} of {} running process(es)",
            killed, live
        ));
    })
    .map_err(|e| UpscaleError::Other(format!("Failed to set signal handler: {}", e)))?;

    let spawner = CommandSpawner::new(&args.upscayl_bin);
    let copier = ExiftoolCopier::new(&args.exiftool);
    let sink = ConsoleSink::new();
    let notifier = ConsoleNotifier;

    let result =
        BatchOrchestrator::new(&spawner, &copier, &sink, &notifier, ctx).run(&request)?;

    let rows = summary_rows(&result, &request.input_root);
    if !rows.is_empty() {
        println!("{}", Table::new(&rows));
    }

    if let Some(ref report) = args.report {
        write_report(&rows, report)?;
        output::print_success(&format!("Report saved to '{}'", report.display()));
    }

    match result.status() {
        BatchStatus::AllSucceeded => output::print_done(&format!(
            "Upscaled {} folder(s)",
            result.succeeded()
        )),
        BatchStatus::CompletedWithErrors => output::print_warning(&format!(
            "{} of {} folder(s) failed",
            result.failed(),
            result.jobs.len()
        )),
        BatchStatus::Cancelled => output::print_warning(&format!(
            "Batch stopped after {} folder(s)",
            result.jobs.len()
        )),
    }

    Ok(())
}

/// 由命令行参数构造批量请求，输入/输出路径转为绝对路径
fn build_request(args: &BatchArgs) -> Result<BatchRequest> {
    if !args.input.is_dir() {
        return Err(UpscaleError::DirectoryNotFound {
            path: args.input.display().to_string(),
        });
    }

    let input_root = absolute(&args.input)?;
    let output_root = absolute(&args.output)?;

    let params = UpscaleParams {
        scale: args.scale,
        custom_width: args.width,
        compression: args.compression,
        tile_size: args.tile_size,
        tta: args.tta,
        model: args.model.clone(),
        gpu_id: args.gpu_id.clone(),
        format: args.format.into(),
    };

    Ok(BatchRequest {
        input_root,
        output_root,
        params,
        models: ModelPaths {
            builtin: args.models_path.clone(),
            custom: args.custom_models_path.clone(),
        },
        recursive: args.recursive,
        copy_metadata: args.copy_metadata,
    })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| {
        UpscaleError::InvalidArgument(format!("Cannot resolve '{}': {}", path.display(), e))
    })
}

/// 生成汇总行，目录显示为相对输入根目录的路径
fn summary_rows(result: &BatchResult, input_root: &Path) -> Vec<SummaryRow> {
    result
        .jobs
        .iter()
        .map(|job| {
            let relative = job
                .item
                .source
                .strip_prefix(input_root)
                .unwrap_or(&job.item.source);
            let folder = if relative.as_os_str().is_empty() {
                ".".to_string()
            } else {
                relative.display().to_string()
            };
            SummaryRow {
                folder,
                output: job.item.dest.display().to_string(),
                outcome: job.outcome.to_string(),
                metadata_failures: job.metadata_failures,
            }
        })
        .collect()
}

/// 保存 CSV 报告
fn write_report(rows: &[SummaryRow], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|e| UpscaleError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}
