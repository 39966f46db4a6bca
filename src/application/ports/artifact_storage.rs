//! Artifact Storage Port - 出站端口
//!
//! 定义被生成 / 被修补的源文件的读写与备份接口

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 文件存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Write failed for {path}: {message}")]
    WriteError { path: String, message: String },

    #[error("IO error: {0}")]
    IoError(String),
}

impl StorageError {
    pub fn write(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::WriteError {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// 在原路径后追加后缀得到备份路径，如 `a.py` + `.backup_x` → `a.py.backup_x`
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Artifact Storage Port
#[async_trait]
pub trait ArtifactStoragePort: Send + Sync {
    /// 文件是否存在
    async fn exists(&self, path: &Path) -> bool;

    /// 读取文本内容，文件不存在时返回 FileNotFound
    async fn read_to_string(&self, path: &Path) -> Result<String, StorageError>;

    /// 文件存在时复制到备份路径并返回该路径；文件不存在时返回 None
    async fn backup(&self, path: &Path, suffix: &str) -> Result<Option<PathBuf>, StorageError>;

    /// 覆盖写入（必要时创建父目录）
    async fn write(&self, path: &Path, content: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("services/domain_prompts.py"), ".backup_before_sheet_extract"),
            PathBuf::from("services/domain_prompts.py.backup_before_sheet_extract")
        );
    }
}
