//! # 后处理：元数据传播
//!
//! 作业成功后，把源目录中同名文件的元数据复制到输出文件。
//!
//! ## 功能
//! - 遍历输出目录中的文件，按文件名匹配源文件
//! - 逐文件复制元数据，失败单独上报，不影响作业状态
//! - 输出目录无法列出时仅跳过本目录
//!
//! ## 依赖关系
//! - 被 `batch/orchestrator.rs` 调用
//! - 使用 `upscayl/metadata.rs` 的复制原语

use super::events::{BatchEvent, EventSink};
use crate::upscayl::MetadataCopier;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 单文件元数据复制结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataOutcome {
    /// 输出文件
    pub file: PathBuf,
    pub result: std::result::Result<(), String>,
}

/// 元数据后处理器
pub struct PostProcessor<'a> {
    copier: &'a dyn MetadataCopier,
}

impl<'a> PostProcessor<'a> {
    pub fn new(copier: &'a dyn MetadataCopier) -> Self {
        Self { copier }
    }

    /// 为 `dest_dir` 中每个在 `source_dir` 有同名文件的输出复制元数据
    pub fn copy_all(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        sink: &dyn EventSink,
    ) -> Vec<MetadataOutcome> {
        debug!(dest = %dest_dir.display(), "copying metadata");

        let entries = match fs::read_dir(dest_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dest = %dest_dir.display(), error = %e, "error in batch metadata copy");
                return Vec::new();
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|e| e.path())
            .collect();
        files.sort();

        let mut outcomes = Vec::new();
        for out_file in files {
            let Some(name) = out_file.file_name() else {
                continue;
            };
            if !source_dir.join(name).is_file() {
                continue;
            }

            let result = match self.copier.copy_metadata(source_dir, &out_file) {
                Ok(()) => {
                    debug!(file = %out_file.display(), "metadata copied");
                    Ok(())
                }
                Err(e) => {
                    let reason = e.to_string();
                    warn!(file = %out_file.display(), error = %reason, "error copying metadata");
                    sink.emit(BatchEvent::MetadataError(reason.clone()));
                    Err(reason)
                }
            };
            outcomes.push(MetadataOutcome {
                file: out_file,
                result,
            });
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::testing::{FakeCopier, RecordingSink};
    use std::fs::File;

    #[test]
    fn test_copies_only_matching_files() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::create_dir_all(dst.join("sub")).unwrap();
        for name in ["a.png", "b.png"] {
            File::create(src.join(name)).unwrap();
        }
        for name in ["a.png", "c.png"] {
            File::create(dst.join(name)).unwrap();
        }

        let copier = FakeCopier::default();
        let sink = RecordingSink::default();
        let outcomes = PostProcessor::new(&copier).copy_all(&src, &dst, &sink);

        assert_eq!(
            outcomes,
            vec![MetadataOutcome {
                file: dst.join("a.png"),
                result: Ok(()),
            }]
        );
        assert_eq!(
            *copier.calls.lock().unwrap(),
            vec![(src.clone(), dst.join("a.png"))]
        );
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_failures_are_collected_and_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();
        for name in ["bad1.png", "good.png", "bad2.png"] {
            File::create(src.join(name)).unwrap();
            File::create(dst.join(name)).unwrap();
        }

        let copier = FakeCopier::default();
        let sink = RecordingSink::default();
        let outcomes = PostProcessor::new(&copier).copy_all(&src, &dst, &sink);

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes.iter().filter(|o| o.result.is_err()).count(), 2);
        let reported = sink
            .events()
            .iter()
            .filter(|e| matches!(e, BatchEvent::MetadataError(_)))
            .count();
        assert_eq!(reported, 2);
    }

    #[test]
    fn test_unreadable_destination_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let copier = FakeCopier::default();
        let sink = RecordingSink::default();

        let outcomes =
            PostProcessor::new(&copier).copy_all(tmp.path(), &tmp.path().join("missing"), &sink);

        assert!(outcomes.is_empty());
        assert!(copier.calls.lock().unwrap().is_empty());
    }
}
