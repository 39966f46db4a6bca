//! File Storage - 文件系统源文件存储实现
//!
//! 实现 ArtifactStoragePort trait

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{backup_path, ArtifactStoragePort, StorageError};

/// 文件系统存储
///
/// 备份与写入不是事务：备份后写入中途失败时，原文件可能只写了一部分，
/// 需要手工从备份恢复
#[derive(Debug, Clone, Default)]
pub struct FileArtifactStorage;

impl FileArtifactStorage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArtifactStoragePort for FileArtifactStorage {
    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, StorageError> {
        fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::FileNotFound(path.display().to_string())
            } else {
                StorageError::IoError(format!("{}: {}", path.display(), e))
            }
        })
    }

    async fn backup(&self, path: &Path, suffix: &str) -> Result<Option<PathBuf>, StorageError> {
        if !self.exists(path).await {
            return Ok(None);
        }

        let backup = backup_path(path, suffix);
        fs::copy(path, &backup)
            .await
            .map_err(|e| StorageError::write(&backup, e))?;

        tracing::info!(
            path = %path.display(),
            backup = %backup.display(),
            "Backup created"
        );

        Ok(Some(backup))
    }

    async fn write(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::write(path, e))?;
        }

        fs::write(path, content)
            .await
            .map_err(|e| StorageError::write(path, e))?;

        tracing::debug!(
            path = %path.display(),
            size = content.len(),
            "File written"
        );

        Ok(())
    }
}
