//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod artifact_storage;
mod confirm;
mod recipe_book;
mod sheet_source;

pub use artifact_storage::{backup_path, ArtifactStoragePort, StorageError};
pub use confirm::{ConfirmPort, FixedAnswer};
pub use recipe_book::{RecipeBookPort, RecipeError};
pub use sheet_source::{FetchError, SheetSourcePort};
