//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod memory;

pub use adapters::{
    CsvFileSource, FileArtifactStorage, HttpSheetClient, HttpSheetClientConfig, StdinConfirm,
    TomlRecipeBook,
};
pub use memory::{InMemoryArtifactStorage, StaticSheetSource};
