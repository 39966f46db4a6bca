//! In-Memory Artifact Storage Implementation
//!
//! 以路径为键的内存文件表

use async_trait::async_trait;
use dashmap::DashMap;
use std::path::{Path, PathBuf};

use crate::application::ports::{backup_path, ArtifactStoragePort, StorageError};

/// 内存文件存储
pub struct InMemoryArtifactStorage {
    files: DashMap<PathBuf, String>,
}

impl InMemoryArtifactStorage {
    pub fn new() -> Self {
        Self {
            files: DashMap::new(),
        }
    }

    /// 预置文件内容
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// 读取当前内容（测试断言用）
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.get(path).map(|c| c.clone())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Default for InMemoryArtifactStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactStoragePort for InMemoryArtifactStorage {
    async fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, StorageError> {
        self.get(path)
            .ok_or_else(|| StorageError::FileNotFound(path.display().to_string()))
    }

    async fn backup(&self, path: &Path, suffix: &str) -> Result<Option<PathBuf>, StorageError> {
        let Some(content) = self.get(path) else {
            return Ok(None);
        };
        let backup = backup_path(path, suffix);
        self.files.insert(backup.clone(), content);
        tracing::debug!(path = %path.display(), backup = %backup.display(), "Backup created");
        Ok(Some(backup))
    }

    async fn write(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        self.files.insert(path.to_path_buf(), content.to_string());
        tracing::debug!(path = %path.display(), size = content.len(), "File written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_backup_then_write() {
        let storage = InMemoryArtifactStorage::new().with_file("a.py", "old");
        let path = Path::new("a.py");

        let backup = storage.backup(path, ".bak").await.unwrap();
        storage.write(path, "new").await.unwrap();

        assert_eq!(backup, Some(PathBuf::from("a.py.bak")));
        assert_eq!(storage.get(Path::new("a.py.bak")).as_deref(), Some("old"));
        assert_eq!(storage.read_to_string(path).await.unwrap(), "new");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let storage = InMemoryArtifactStorage::new();
        let path = Path::new("missing.py");
        assert!(!storage.exists(path).await);
        assert_eq!(storage.backup(path, ".bak").await.unwrap(), None);
        assert!(matches!(
            storage.read_to_string(path).await,
            Err(StorageError::FileNotFound(_))
        ));
    }
}
