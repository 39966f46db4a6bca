//! Prompt Context - 表格行数据

/// 从表格导出的原始行
///
/// 不变量:
/// - 每一行的单元格数量与表头数量一致（短行补空字符串，长行截断）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRows {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SheetRows {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
