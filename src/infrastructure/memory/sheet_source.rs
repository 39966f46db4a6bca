//! In-Memory Sheet Source Implementation

use async_trait::async_trait;

use crate::application::ports::{FetchError, SheetSourcePort};
use crate::domain::prompts::SheetRows;

/// 返回固定行数据的表格来源
pub struct StaticSheetSource {
    rows: SheetRows,
    description: String,
}

impl StaticSheetSource {
    pub fn new(rows: SheetRows) -> Self {
        Self {
            rows,
            description: "in-memory sheet".to_string(),
        }
    }

    /// 由表头与行构造
    pub fn from_cells(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(SheetRows::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        ))
    }
}

#[async_trait]
impl SheetSourcePort for StaticSheetSource {
    async fn fetch_rows(&self) -> Result<SheetRows, FetchError> {
        Ok(self.rows.clone())
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}
