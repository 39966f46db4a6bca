//! Recipe Query Handlers

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::RecipeBookPort;
use crate::application::queries::ListRecipes;
use crate::domain::patch::PatchRecipe;

/// 配方摘要
#[derive(Debug, Clone)]
pub struct RecipeSummary {
    pub name: String,
    pub description: String,
    pub target: Option<PathBuf>,
    pub rule_count: usize,
}

impl From<PatchRecipe> for RecipeSummary {
    fn from(recipe: PatchRecipe) -> Self {
        Self {
            rule_count: recipe.rules.len(),
            name: recipe.name,
            description: recipe.description,
            target: recipe.target,
        }
    }
}

/// ListRecipes Handler
pub struct ListRecipesHandler {
    recipes: Arc<dyn RecipeBookPort>,
}

impl ListRecipesHandler {
    pub fn new(recipes: Arc<dyn RecipeBookPort>) -> Self {
        Self { recipes }
    }

    pub fn handle(&self, _query: ListRecipes) -> Vec<RecipeSummary> {
        self.recipes
            .list()
            .into_iter()
            .map(RecipeSummary::from)
            .collect()
    }
}
