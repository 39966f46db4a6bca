//! CSV → SheetRows

use crate::application::ports::FetchError;
use crate::domain::prompts::SheetRows;

/// 解析 CSV 文本，第一行为表头
///
/// 允许行宽不一致（短行补空），去除 UTF-8 BOM；HTML 页面直接拒绝
pub fn parse_csv(text: &str) -> Result<SheetRows, FetchError> {
    let text = text.trim_start_matches('\u{feff}');
    if looks_like_html(text) {
        return Err(FetchError::NotCsv("an HTML page".to_string()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(FetchError::CsvError("missing header row".to_string()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(SheetRows::new(headers, rows))
}

/// 内容以 `<!doctype` 或 `<html` 开头（忽略大小写与前导空白）
fn looks_like_html(text: &str) -> bool {
    let head = text.trim_start().chars().take(9).collect::<String>().to_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}
