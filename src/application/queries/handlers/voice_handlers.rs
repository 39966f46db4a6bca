//! Voice Query Handlers

use serde::Serialize;

use crate::application::queries::{BuildVoiceConfig, GetDefaultVoice, ListProviders, ListVoices};
use crate::domain::voice::{self, Provider, VoiceConfig, VoiceRecord, DEFAULT_LANGUAGE};

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色列表响应
#[derive(Debug, Clone, Serialize)]
pub struct VoiceListResponse {
    pub provider: String,
    pub language_code: String,
    /// Google 请求的语言没有独立列表时，实际使用的语言
    pub fallback_language: Option<&'static str>,
    pub voices: Vec<VoiceRecord>,
}

/// 默认音色响应
#[derive(Debug, Clone, Serialize)]
pub struct DefaultVoiceResponse {
    pub provider: String,
    pub language_code: String,
    /// 没有可用音色时为空字符串
    pub voice_id: String,
}

/// 提供方信息
#[derive(Debug, Clone, Serialize)]
pub struct ProviderResponse {
    pub id: &'static str,
    pub name: &'static str,
    pub languages: Vec<&'static str>,
}

// ============================================================================
// Handler
// ============================================================================

/// 音色目录查询处理器
///
/// 目录是静态数据，查询不会失败
pub struct VoiceCatalogHandler {
    default_language: String,
}

impl VoiceCatalogHandler {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
        }
    }

    fn language(&self, requested: Option<String>) -> String {
        requested.unwrap_or_else(|| self.default_language.clone())
    }

    pub fn list(&self, query: ListVoices) -> VoiceListResponse {
        let language_code = self.language(query.language_code);
        let voices = voice::list_voices(&query.provider, &language_code).to_vec();

        let fallback_language = match Provider::from_name(&query.provider) {
            Some(Provider::Google)
                if !voice::languages(Provider::Google).contains(&language_code.as_str()) =>
            {
                tracing::debug!(language = %language_code, "No dedicated voices, using fallback language");
                Some(DEFAULT_LANGUAGE)
            }
            _ => None,
        };

        VoiceListResponse {
            provider: query.provider,
            language_code,
            fallback_language,
            voices,
        }
    }

    pub fn default_voice(&self, query: GetDefaultVoice) -> DefaultVoiceResponse {
        let language_code = self.language(query.language_code);
        let voice_id = voice::default_voice(&query.provider, &language_code).to_string();
        DefaultVoiceResponse {
            provider: query.provider,
            language_code,
            voice_id,
        }
    }

    pub fn voice_config(&self, query: BuildVoiceConfig) -> VoiceConfig {
        let language_code = self.language(query.language_code);
        let voice_id = query
            .voice_id
            .unwrap_or_else(|| voice::default_voice(&query.provider, &language_code).to_string());
        voice::build_voice_config(&query.provider, &voice_id, &language_code)
    }

    pub fn providers(&self, _query: ListProviders) -> Vec<ProviderResponse> {
        Provider::ALL
            .iter()
            .map(|p| ProviderResponse {
                id: p.as_str(),
                name: p.display_name(),
                languages: voice::languages(*p),
            })
            .collect()
    }
}

impl Default for VoiceCatalogHandler {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(provider: &str, lang: Option<&str>) -> VoiceListResponse {
        VoiceCatalogHandler::default().list(ListVoices {
            provider: provider.into(),
            language_code: lang.map(String::from),
        })
    }

    #[test]
    fn test_list_uses_configured_default_language() {
        let handler = VoiceCatalogHandler::new("ja");
        let response = handler.list(ListVoices {
            provider: "google".into(),
            language_code: None,
        });
        assert_eq!(response.language_code, "ja");
        assert_eq!(response.voices[0].id, "ja-JP-Neural2-B");
        assert_eq!(response.fallback_language, None);
    }

    #[test]
    fn test_list_reports_fallback() {
        let response = list("google", Some("de"));
        assert_eq!(response.fallback_language, Some("vi"));
        assert_eq!(response.voices[0].id, "vi-VN-Standard-A");

        assert_eq!(list("elevenlabs", Some("de")).fallback_language, None);
    }

    #[test]
    fn test_unknown_provider_lists_nothing() {
        let response = list("azure", None);
        assert!(response.voices.is_empty());
        assert_eq!(response.fallback_language, None);

        let default = VoiceCatalogHandler::default().default_voice(GetDefaultVoice {
            provider: "azure".into(),
            language_code: None,
        });
        assert_eq!(default.voice_id, "");
    }

    #[test]
    fn test_voice_config_defaults_voice_id() {
        let handler = VoiceCatalogHandler::default();
        let config = handler.voice_config(BuildVoiceConfig {
            provider: "elevenlabs".into(),
            voice_id: None,
            language_code: Some("en".into()),
        });
        assert_eq!(config.voice_id, "adam");
        assert_eq!(config.language_code, "en");

        let explicit = handler.voice_config(BuildVoiceConfig {
            provider: "google".into(),
            voice_id: Some("custom".into()),
            language_code: None,
        });
        assert_eq!(explicit.voice_id, "custom");
        assert_eq!(explicit.language_code, "vi");
    }

    #[test]
    fn test_providers() {
        let providers = VoiceCatalogHandler::default().providers(ListProviders);
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0].id, "google");
        assert_eq!(providers[0].languages.len(), 5);
        assert_eq!(providers[1].name, "ElevenLabs");
    }
}
