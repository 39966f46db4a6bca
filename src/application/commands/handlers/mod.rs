//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod patch_handlers;
mod prompt_handlers;

pub use patch_handlers::*;
pub use prompt_handlers::*;
