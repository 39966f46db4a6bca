//! Recipe Adapter - 补丁配方来源

mod toml_recipes;

pub use toml_recipes::TomlRecipeBook;
