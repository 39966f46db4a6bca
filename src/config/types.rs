//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::DEFAULT_PROMPTS_BACKUP_SUFFIX;
use crate::domain::voice::DEFAULT_LANGUAGE;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 表格来源配置
    #[serde(default)]
    pub sheet: SheetConfig,

    /// 提示词配置文件生成
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// 源文件补丁
    #[serde(default)]
    pub patch: PatchConfig,

    /// 音色目录
    #[serde(default)]
    pub voice: VoiceSettings,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 表格来源配置
#[derive(Debug, Clone, Deserialize)]
pub struct SheetConfig {
    /// 表格服务基础 URL
    #[serde(default = "default_sheet_base_url")]
    pub base_url: String,

    /// 表格 ID
    #[serde(default = "default_sheet_id")]
    pub id: String,

    /// 工作表 gid
    #[serde(default = "default_sheet_gid")]
    pub gid: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_sheet_timeout")]
    pub timeout_secs: u64,
}

fn default_sheet_base_url() -> String {
    "https://docs.google.com".to_string()
}

fn default_sheet_id() -> String {
    "1ohiL6xOBbjC7La2iUdkjrVjG4IEUnVWhI0fRoarD6P0".to_string()
}

fn default_sheet_gid() -> String {
    "1507296519".to_string()
}

fn default_sheet_timeout() -> u64 {
    30
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            base_url: default_sheet_base_url(),
            id: default_sheet_id(),
            gid: default_sheet_gid(),
            timeout_secs: default_sheet_timeout(),
        }
    }
}

/// 提示词配置文件生成
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// 生成的源文件路径
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// 覆盖前备份文件的后缀
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("services/domain_prompts.py")
}

fn default_backup_suffix() -> String {
    DEFAULT_PROMPTS_BACKUP_SUFFIX.to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            backup_suffix: default_backup_suffix(),
        }
    }
}

/// 源文件补丁
#[derive(Debug, Clone, Deserialize)]
pub struct PatchConfig {
    /// 配方未指定目标文件时使用的默认目标
    #[serde(default = "default_patch_target")]
    pub target: PathBuf,

    /// 额外的配方文件（TOML），可覆盖内置配方
    #[serde(default)]
    pub recipes_file: Option<PathBuf>,
}

fn default_patch_target() -> PathBuf {
    PathBuf::from("ui/image2video_panel.py")
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            target: default_patch_target(),
            recipes_file: None,
        }
    }
}

/// 音色目录配置
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceSettings {
    /// 未指定语言时使用的语言代码
    #[serde(default = "default_language")]
    pub default_language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            default_language: default_language(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
