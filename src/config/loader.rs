//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（studio.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::domain::voice::{languages, Provider};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["studio", "studio.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `STUDIO_SHEET__GID=1507296519`
/// - `STUDIO_SHEET__TIMEOUT_SECS=60`
/// - `STUDIO_GENERATOR__OUTPUT_PATH=services/domain_prompts.py`
/// - `STUDIO_PATCH__RECIPES_FILE=recipes/local.toml`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("sheet.base_url", defaults.sheet.base_url.as_str())?
        .set_default("sheet.id", defaults.sheet.id.as_str())?
        .set_default("sheet.gid", defaults.sheet.gid.as_str())?
        .set_default("sheet.timeout_secs", defaults.sheet.timeout_secs)?
        .set_default(
            "generator.output_path",
            defaults.generator.output_path.to_string_lossy().into_owned(),
        )?
        .set_default(
            "generator.backup_suffix",
            defaults.generator.backup_suffix.as_str(),
        )?
        .set_default(
            "patch.target",
            defaults.patch.target.to_string_lossy().into_owned(),
        )?
        .set_default(
            "voice.default_language",
            defaults.voice.default_language.as_str(),
        )?
        .set_default("log.level", defaults.log.level.as_str())?
        .set_default("log.json", defaults.log.json)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 前缀: STUDIO_，层级分隔符: __
    // gid 等数字样式的值保持字符串，不做类型推断
    builder = builder.add_source(
        Environment::with_prefix("STUDIO")
            .prefix_separator("_")
            .separator("__"),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let invalid = |message: &str| -> Result<(), ConfigError> {
        Err(ConfigError::ValidationError(message.to_string()))
    };

    if config.sheet.base_url.trim().is_empty() {
        return invalid("Sheet base URL cannot be empty");
    }
    if config.sheet.id.trim().is_empty() || config.sheet.gid.trim().is_empty() {
        return invalid("Sheet id and gid cannot be empty");
    }
    if config.sheet.timeout_secs == 0 {
        return invalid("Sheet timeout cannot be 0");
    }

    if config.generator.output_path.as_os_str().is_empty() {
        return invalid("Generator output path cannot be empty");
    }
    if config.generator.backup_suffix.trim().is_empty() {
        return invalid("Generator backup suffix cannot be empty");
    }

    if config.patch.target.as_os_str().is_empty() {
        return invalid("Patch target cannot be empty");
    }

    let supported = languages(Provider::Google);
    if !supported.contains(&config.voice.default_language.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "Unsupported default language '{}' (expected one of {})",
            config.voice.default_language,
            supported.join(", ")
        )));
    }

    Ok(())
}

/// 打印配置信息
pub fn print_config(config: &AppConfig) {
    tracing::debug!("=== Application Configuration ===");
    tracing::debug!("Sheet: {} (gid {})", config.sheet.id, config.sheet.gid);
    tracing::debug!("Sheet Base URL: {}", config.sheet.base_url);
    tracing::debug!("Sheet Timeout: {}s", config.sheet.timeout_secs);
    tracing::debug!("Generator Output: {:?}", config.generator.output_path);
    tracing::debug!("Generator Backup Suffix: {}", config.generator.backup_suffix);
    tracing::debug!("Patch Target: {:?}", config.patch.target);
    if let Some(recipes) = &config.patch.recipes_file {
        tracing::debug!("Patch Recipes File: {:?}", recipes);
    }
    tracing::debug!("Voice Default Language: {}", config.voice.default_language);
    tracing::debug!("Log Level: {}", config.log.level);
    tracing::debug!("=================================");
}
