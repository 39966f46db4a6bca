//! CSV File Source - 从本地 CSV 文件读取（离线重新生成）

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use super::parse_csv;
use crate::application::ports::{FetchError, SheetSourcePort};
use crate::domain::prompts::SheetRows;

/// 本地 CSV 文件来源
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SheetSourcePort for CsvFileSource {
    async fn fetch_rows(&self) -> Result<SheetRows, FetchError> {
        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::IoError(format!("{}: {}", self.path.display(), e)))?;
        parse_csv(&text)
    }

    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }
}
