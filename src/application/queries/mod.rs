//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：音色目录与补丁配方

mod recipe_queries;
mod voice_queries;

pub mod handlers;

pub use recipe_queries::*;
pub use voice_queries::*;
