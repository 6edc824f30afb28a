//! # models 命令实现
//!
//! 列出内置模型和自定义模型目录中的模型。
//!
//! ## 依赖关系
//! - 使用 `cli/models.rs` 定义的参数
//! - 使用 `models/catalog.rs`, `utils/output.rs`

use crate::cli::models::ModelsArgs;
use crate::error::{Result, UpscaleError};
use crate::models::catalog::MODELS;
use crate::utils::output;

use std::fs;
use std::path::Path;
use tabled::{Table, Tabled};

/// 模型表格行
#[derive(Debug, Clone, Tabled)]
struct ModelRow {
    #[tabled(rename = "Model")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Source")]
    source: String,
}

/// 执行 models 命令
pub fn execute(args: ModelsArgs) -> Result<()> {
    output::print_header("Available Models");

    let mut rows: Vec<ModelRow> = MODELS
        .iter()
        .map(|(id, name)| ModelRow {
            id: id.to_string(),
            name: name.to_string(),
            source: "built-in".to_string(),
        })
        .collect();

    if let Some(ref dir) = args.custom_models_path {
        let custom = find_custom_models(dir)?;
        if custom.is_empty() {
            output::print_warning(&format!("No custom models found in '{}'", dir.display()));
        }
        rows.extend(custom.into_iter().map(|id| ModelRow {
            name: id.clone(),
            id,
            source: "custom".to_string(),
        }));
    }

    println!("{}", Table::new(&rows));
    Ok(())
}

/// 自定义模型目录中的模型名：`*.param` 文件去掉扩展名，按名称排序
fn find_custom_models(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(UpscaleError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut models: Vec<String> = fs::read_dir(dir)
        .map_err(|e| UpscaleError::DirectoryRead {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "param").unwrap_or(false))
        .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().to_string()))
        .collect();

    models.sort();
    models.dedup();
    Ok(models)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_find_custom_models() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["4x-anime.param", "4x-anime.bin", "remacri.param", "notes.txt"] {
            File::create(tmp.path().join(name)).unwrap();
        }

        let models = find_custom_models(tmp.path()).unwrap();
        assert_eq!(models, vec!["4x-anime", "remacri"]);
    }

    #[test]
    fn test_find_custom_models_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            find_custom_models(&tmp.path().join("missing")),
            Err(UpscaleError::DirectoryNotFound { .. })
        ));
    }
}
