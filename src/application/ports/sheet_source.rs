//! Sheet Source Port - 表格数据来源抽象
//!
//! 具体实现在 infrastructure/adapters/sheet：HTTP 导出接口或本地 CSV 文件

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::prompts::SheetRows;

/// 获取表格数据错误
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed CSV: {0}")]
    CsvError(String),

    /// 未发布的表格会被重定向到登录页（HTTP 200 + HTML）
    #[error("Expected CSV but received {0}; is the sheet published to the web?")]
    NotCsv(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<csv::Error> for FetchError {
    fn from(err: csv::Error) -> Self {
        FetchError::CsvError(err.to_string())
    }
}

/// Sheet Source Port
#[async_trait]
pub trait SheetSourcePort: Send + Sync {
    /// 获取全部数据行（第一行为表头）
    async fn fetch_rows(&self) -> Result<SheetRows, FetchError>;

    /// 来源描述，写入生成文件头部
    fn describe(&self) -> String;
}
