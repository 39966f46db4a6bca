//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{FetchError, StorageError};
use crate::domain::patch::PatchError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 获取表格数据失败
    #[error("Failed to fetch sheet: {0}")]
    Fetch(#[from] FetchError),

    /// 文件读写错误
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// 补丁规则错误
    #[error("Patch error: {0}")]
    Patch(#[from] PatchError),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 表格获取失败（需要人工处理表格的发布设置）
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}
