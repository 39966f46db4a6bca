//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod console;
pub mod recipes;
pub mod sheet;
pub mod storage;

pub use console::StdinConfirm;
pub use recipes::TomlRecipeBook;
pub use sheet::*;
pub use storage::*;
