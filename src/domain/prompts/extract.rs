//! Prompt Context - 从表格行提取 Domain → Topic → Prompt 表

use super::{ColumnMap, DomainPromptTable, SheetRows};

/// 表格导出中表示“缺失值”的占位文本（与 pandas 默认的 NA 集合一致，区分大小写）
pub const MISSING_PLACEHOLDERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// 提取统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// 读取的数据行数
    pub rows_read: usize,
    /// 因 domain / topic 缺失而跳过的行数
    pub rows_skipped: usize,
    /// 覆盖了先前 prompt 的行数（重复的 domain + topic）
    pub rows_overwritten: usize,
}

/// 提取结果
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub table: DomainPromptTable,
    pub columns: ColumnMap,
    pub stats: ExtractStats,
}

/// 单元格取值：去除首尾空白，空串与占位文本视为缺失
fn cell_value(row: &[String], column: Option<usize>) -> Option<&str> {
    let value = row.get(column?)?.trim();
    if value.is_empty() || MISSING_PLACEHOLDERS.contains(&value) {
        None
    } else {
        Some(value)
    }
}

/// 提取表格，附带列识别结果与统计
///
/// - domain 或 topic 缺失的行被跳过
/// - prompt 缺失时为空字符串
/// - 重复的 (domain, topic) 以最后一行为准
pub fn extract_with_stats(rows: &SheetRows) -> Extraction {
    let columns = ColumnMap::resolve(rows.headers());
    let mut table = DomainPromptTable::new();
    let mut stats = ExtractStats {
        rows_read: rows.len(),
        ..Default::default()
    };

    for row in rows.rows() {
        let (Some(domain), Some(topic)) = (
            cell_value(row, columns.domain),
            cell_value(row, columns.topic),
        ) else {
            stats.rows_skipped += 1;
            continue;
        };
        let prompt = cell_value(row, columns.prompt).unwrap_or("");

        if table.insert(domain, topic, prompt).is_some() {
            stats.rows_overwritten += 1;
            tracing::debug!(domain, topic, "Duplicate topic, keeping the later prompt");
        }
    }

    tracing::info!(
        rows = stats.rows_read,
        skipped = stats.rows_skipped,
        overwritten = stats.rows_overwritten,
        domains = table.domain_count(),
        topics = table.topic_count(),
        "Extracted prompt table"
    );

    Extraction {
        table,
        columns,
        stats,
    }
}

/// 提取表格
pub fn extract_table(rows: &SheetRows) -> DomainPromptTable {
    extract_with_stats(rows).table
}
