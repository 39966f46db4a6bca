//! Patch Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("名称不能为空")]
    EmptyName,

    #[error("补丁 {0} 没有任何规则")]
    NoRules(String),

    #[error("补丁 {recipe} 中的规则重名: {rule}")]
    DuplicateRule { recipe: String, rule: String },

    #[error("无效的规则 {rule}: {reason}")]
    InvalidRule { rule: String, reason: String },

    #[error("补丁 {recipe} 的规则 {rule} 在改写后的内容上仍会再次生效")]
    NotIdempotent { recipe: String, rule: String },
}
