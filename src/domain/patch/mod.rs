//! Patch Context - 源文件补丁上下文
//!
//! 职责:
//! - 字面量改写规则（替换 / 锚点插入 / 行过滤）
//! - 规则校验（保证重复执行无副作用）
//! - 配方执行与逐条结果报告

mod errors;
mod recipe;
mod rules;

pub use errors::PatchError;
pub use recipe::{FixReport, FixStatus, PatchOutcome, PatchRecipe};
pub use rules::{LineAction, PatchRule};
