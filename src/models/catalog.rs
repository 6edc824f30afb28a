//! # 内置模型目录
//!
//! upscayl-bin 随附的模型列表。不在此列表中的模型从自定义模型目录加载。

/// 内置模型 (id, 显示名称)
pub const MODELS: &[(&str, &str)] = &[
    ("upscayl-standard-4x", "Upscayl Standard"),
    ("upscayl-lite-4x", "Upscayl Lite"),
    ("remacri-4x", "Remacri (Non-Commercial)"),
    ("ultramix-balanced-4x", "Ultramix (Non-Commercial)"),
    ("ultrasharp-4x", "Ultrasharp (Non-Commercial)"),
    ("digital-art-4x", "Digital Art"),
    ("high-fidelity-4x", "High Fidelity"),
];

/// 默认模型
pub const DEFAULT_MODEL: &str = "upscayl-standard-4x";

/// 是否为内置模型
pub fn is_builtin(model: &str) -> bool {
    MODELS.iter().any(|(id, _)| *id == model)
}
