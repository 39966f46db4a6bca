//! Recipe Queries

/// 列出所有补丁配方
#[derive(Debug, Clone)]
pub struct ListRecipes;
