//! Prompt Context - Domain / Topic / System Prompt 配置上下文
//!
//! 职责:
//! - 从表格行识别列并提取 Domain → Topic → Prompt 表
//! - 生成 GUI 读取的 Python 配置文件，以及从已生成文件读回

mod codegen;
mod columns;
mod extract;
mod rows;
mod table;

pub use codegen::{escape_str, parse_source, render_source, Provenance, RenderError, TABLE_IDENT};
pub use columns::{classify_header, ColumnKind, ColumnMap};
pub use extract::{extract_table, extract_with_stats, ExtractStats, Extraction, MISSING_PLACEHOLDERS};
pub use rows::SheetRows;
pub use table::{DomainPromptTable, PromptEntry, TableChanges};
