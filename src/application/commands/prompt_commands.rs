//! Prompt Commands

use std::path::PathBuf;

/// 默认的生成文件备份后缀
pub const DEFAULT_PROMPTS_BACKUP_SUFFIX: &str = ".backup_before_sheet_extract";

/// 从表格重新生成 domain_prompts 配置文件
#[derive(Debug, Clone)]
pub struct SyncPrompts {
    /// 生成文件路径
    pub output_path: PathBuf,
    /// 覆盖前的备份后缀
    pub backup_suffix: String,
    /// 只生成与报告，不写入
    pub dry_run: bool,
}

impl SyncPrompts {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            backup_suffix: DEFAULT_PROMPTS_BACKUP_SUFFIX.to_string(),
            dry_run: false,
        }
    }
}
