//! TOML Recipe Book - 从 TOML 加载补丁配方
//!
//! 内置配方编译进二进制；用户配方文件可新增配方或按名称覆盖内置配方

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::application::ports::{RecipeBookPort, RecipeError};
use crate::domain::patch::PatchRecipe;

const BUILTIN_RECIPES: &str = include_str!("../../../../recipes/builtin.toml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecipeFile {
    #[serde(default)]
    recipe: Vec<PatchRecipe>,
}

/// TOML 配方集
#[derive(Debug, Clone, Default)]
pub struct TomlRecipeBook {
    recipes: BTreeMap<String, PatchRecipe>,
}

impl TomlRecipeBook {
    /// 解析并校验 TOML 文本
    pub fn from_toml_str(text: &str, source_name: &str) -> Result<Self, RecipeError> {
        let mut book = Self::default();
        book.merge_str(text, source_name)?;
        Ok(book)
    }

    /// 仅内置配方
    pub fn builtin() -> Result<Self, RecipeError> {
        Self::from_toml_str(BUILTIN_RECIPES, "builtin recipes")
    }

    /// 内置配方 + 可选的用户配方文件
    pub async fn load(extra: Option<&Path>) -> Result<Self, RecipeError> {
        let mut book = Self::builtin()?;
        if let Some(path) = extra {
            let text = tokio::fs::read_to_string(path).await.map_err(|e| RecipeError::IoError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            book.merge_str(&text, &path.display().to_string())?;
        }
        Ok(book)
    }

    fn merge_str(&mut self, text: &str, source_name: &str) -> Result<(), RecipeError> {
        let file: RecipeFile = toml::from_str(text).map_err(|e| RecipeError::ParseError {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;

        for recipe in file.recipe {
            recipe.validate()?;
            if self.recipes.contains_key(&recipe.name) {
                tracing::info!(recipe = %recipe.name, source = source_name, "Recipe overridden");
            }
            self.recipes.insert(recipe.name.clone(), recipe);
        }

        tracing::debug!(source = source_name, total = self.recipes.len(), "Recipes loaded");
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.recipes.keys().map(String::as_str)
    }
}

impl RecipeBookPort for TomlRecipeBook {
    fn get(&self, name: &str) -> Option<PatchRecipe> {
        self.recipes.get(name).cloned()
    }

    fn list(&self) -> Vec<PatchRecipe> {
        self.recipes.values().cloned().collect()
    }
}
