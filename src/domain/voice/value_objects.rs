//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// TTS 服务提供方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    ElevenLabs,
}

impl Provider {
    /// 所有已知的提供方（按展示顺序）
    pub const ALL: [Provider; 2] = [Provider::Google, Provider::ElevenLabs];

    /// 从名称解析（精确匹配小写名称），未知名称返回 None
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "google" => Some(Self::Google),
            "elevenlabs" => Some(Self::ElevenLabs),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::ElevenLabs => "elevenlabs",
        }
    }

    /// 界面上显示的名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Google => "Google TTS",
            Self::ElevenLabs => "ElevenLabs",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 一条音色记录：(标识, 显示名称)
///
/// 不变量:
/// - 同一 (provider, language) 列表内 id 唯一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoiceRecord {
    pub id: &'static str,
    pub label: &'static str,
}

impl VoiceRecord {
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self { id, label }
    }
}

/// 脚本生成使用的音色配置
///
/// 纯数据，不校验 voice_id 是否存在于目录中
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub provider: String,
    pub voice_id: String,
    pub language_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_name() {
        assert_eq!(Provider::from_name("google"), Some(Provider::Google));
        assert_eq!(Provider::from_name("elevenlabs"), Some(Provider::ElevenLabs));
        assert_eq!(Provider::from_name("Google"), None);
        assert_eq!(Provider::from_name(" elevenlabs "), None);
        assert_eq!(Provider::from_name("azure"), None);
        assert_eq!(Provider::from_name(""), None);
    }

    #[test]
    fn test_provider_names_round_trip() {
        for provider in Provider::ALL {
            assert_eq!(Provider::from_name(provider.as_str()), Some(provider));
        }
    }

    #[test]
    fn test_voice_config_serializes_flat() {
        let config = VoiceConfig {
            provider: "google".to_string(),
            voice_id: "vi-VN-Standard-A".to_string(),
            language_code: "vi".to_string(),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["provider"], "google");
        assert_eq!(json["voice_id"], "vi-VN-Standard-A");
        assert_eq!(json["language_code"], "vi");
    }
}
