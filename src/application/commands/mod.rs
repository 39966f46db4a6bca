//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：生成配置文件、修补源文件

mod patch_commands;
mod prompt_commands;

pub mod handlers;

pub use patch_commands::*;
pub use prompt_commands::*;
