//! Recipe Book Port - 补丁配方来源

use thiserror::Error;

use crate::domain::patch::{PatchError, PatchRecipe};

/// 配方加载错误
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Failed to read recipe file {path}: {message}")]
    IoError { path: String, message: String },

    #[error("Failed to parse recipes from {source_name}: {message}")]
    ParseError { source_name: String, message: String },

    #[error("Invalid recipe: {0}")]
    Invalid(#[from] PatchError),
}

/// Recipe Book Port
pub trait RecipeBookPort: Send + Sync {
    /// 按名称查找配方
    fn get(&self, name: &str) -> Option<PatchRecipe>;

    /// 全部配方（按名称排序）
    fn list(&self) -> Vec<PatchRecipe>;
}
