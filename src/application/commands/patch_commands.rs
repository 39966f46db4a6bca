//! Patch Commands

use std::path::PathBuf;

/// 对目标文件应用一个补丁配方
#[derive(Debug, Clone)]
pub struct PatchFile {
    /// 配方名称
    pub recipe: String,
    /// 目标文件；未指定时依次使用配方默认值与全局配置
    pub target: Option<PathBuf>,
    /// 只报告，不写入也不备份
    pub dry_run: bool,
}
