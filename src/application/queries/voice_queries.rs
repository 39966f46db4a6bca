//! Voice Queries

/// 列出某提供方的音色
#[derive(Debug, Clone)]
pub struct ListVoices {
    pub provider: String,
    /// 未指定时使用配置的默认语言
    pub language_code: Option<String>,
}

/// 获取默认音色
#[derive(Debug, Clone)]
pub struct GetDefaultVoice {
    pub provider: String,
    pub language_code: Option<String>,
}

/// 构造音色配置
#[derive(Debug, Clone)]
pub struct BuildVoiceConfig {
    pub provider: String,
    /// 未指定时使用默认音色
    pub voice_id: Option<String>,
    pub language_code: Option<String>,
}

/// 列出所有提供方
#[derive(Debug, Clone)]
pub struct ListProviders;
