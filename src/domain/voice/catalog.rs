//! Voice Context - 静态音色目录
//!
//! Google TTS 按语言分组；ElevenLabs 只有一个与语言无关的列表。
//! 目录在编译期确定，运行时只读。

use super::{Provider, VoiceConfig, VoiceRecord};

/// Google TTS 请求的语言不存在时回退到的语言
pub const DEFAULT_LANGUAGE: &str = "vi";

const GOOGLE_VOICES: &[(&str, &[VoiceRecord])] = &[
    (
        "vi",
        &[
            VoiceRecord::new("vi-VN-Standard-A", "🇻🇳 Nam Miền Bắc (Standard)"),
            VoiceRecord::new("vi-VN-Standard-B", "🇻🇳 Nữ Miền Nam (Standard)"),
            VoiceRecord::new("vi-VN-Wavenet-A", "🇻🇳 Nam Wavenet (Premium)"),
            VoiceRecord::new("vi-VN-Wavenet-B", "🇻🇳 Nữ Wavenet (Premium)"),
        ],
    ),
    (
        "en",
        &[
            VoiceRecord::new("en-US-Neural2-A", "🇺🇸 Male (Neural)"),
            VoiceRecord::new("en-US-Neural2-C", "🇺🇸 Female (Neural)"),
            VoiceRecord::new("en-GB-Neural2-A", "🇬🇧 Male British (Neural)"),
            VoiceRecord::new("en-GB-Neural2-B", "🇬🇧 Female British (Neural)"),
        ],
    ),
    (
        "ja",
        &[
            VoiceRecord::new("ja-JP-Neural2-B", "🇯🇵 Male (Neural)"),
            VoiceRecord::new("ja-JP-Neural2-C", "🇯🇵 Female (Neural)"),
        ],
    ),
    (
        "ko",
        &[
            VoiceRecord::new("ko-KR-Neural2-A", "🇰🇷 Male (Neural)"),
            VoiceRecord::new("ko-KR-Neural2-B", "🇰🇷 Female (Neural)"),
        ],
    ),
    (
        "zh",
        &[
            VoiceRecord::new("zh-CN-Standard-A", "🇨🇳 Female (Standard)"),
            VoiceRecord::new("zh-CN-Standard-B", "🇨🇳 Male (Standard)"),
        ],
    ),
];

const ELEVENLABS_VOICES: &[VoiceRecord] = &[
    VoiceRecord::new("adam", "Adam (Deep & Authoritative)"),
    VoiceRecord::new("rachel", "Rachel (Calm Narration)"),
    VoiceRecord::new("antoni", "Antoni (Young & Energetic)"),
    VoiceRecord::new("bella", "Bella (Soft & Friendly)"),
    VoiceRecord::new("elli", "Elli (Warm & Professional)"),
    VoiceRecord::new("josh", "Josh (Natural & Conversational)"),
];

fn google_voices(language_code: &str) -> Option<&'static [VoiceRecord]> {
    GOOGLE_VOICES
        .iter()
        .find(|(code, _)| *code == language_code)
        .map(|(_, voices)| *voices)
}

/// 按提供方获取音色列表
///
/// Google 的语言不存在时回退到 [`DEFAULT_LANGUAGE`]；
/// ElevenLabs 忽略语言。
pub fn voices_for(provider: Provider, language_code: &str) -> &'static [VoiceRecord] {
    match provider {
        Provider::Google => google_voices(language_code)
            .or_else(|| google_voices(DEFAULT_LANGUAGE))
            .unwrap_or(&[]),
        Provider::ElevenLabs => ELEVENLABS_VOICES,
    }
}

/// 按提供方名称获取音色列表，未知提供方返回空列表
pub fn list_voices(provider: &str, language_code: &str) -> &'static [VoiceRecord] {
    match Provider::from_name(provider) {
        Some(provider) => voices_for(provider, language_code),
        None => &[],
    }
}

/// 默认音色 ID（列表第一项），没有可用音色时返回空字符串
pub fn default_voice(provider: &str, language_code: &str) -> &'static str {
    list_voices(provider, language_code)
        .first()
        .map(|voice| voice.id)
        .unwrap_or("")
}

/// 构造音色配置
pub fn build_voice_config(provider: &str, voice_id: &str, language_code: &str) -> VoiceConfig {
    VoiceConfig {
        provider: provider.to_string(),
        voice_id: voice_id.to_string(),
        language_code: language_code.to_string(),
    }
}

/// 所有提供方 (id, 显示名称)
pub fn providers() -> Vec<(&'static str, &'static str)> {
    Provider::ALL
        .iter()
        .map(|p| (p.as_str(), p.display_name()))
        .collect()
}

/// 拥有独立音色列表的语言代码
///
/// ElevenLabs 与语言无关，返回空列表
pub fn languages(provider: Provider) -> Vec<&'static str> {
    match provider {
        Provider::Google => GOOGLE_VOICES.iter().map(|(code, _)| *code).collect(),
        Provider::ElevenLabs => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn supported_pairs() -> Vec<(&'static str, &'static str)> {
        let mut pairs: Vec<_> = languages(Provider::Google)
            .into_iter()
            .map(|lang| ("google", lang))
            .collect();
        pairs.push(("elevenlabs", DEFAULT_LANGUAGE));
        pairs
    }

    #[test]
    fn test_supported_pairs_are_non_empty_and_unique() {
        for (provider, lang) in supported_pairs() {
            let voices = list_voices(provider, lang);
            assert!(!voices.is_empty(), "{provider}/{lang} has no voices");

            let ids: HashSet<_> = voices.iter().map(|v| v.id).collect();
            assert_eq!(ids.len(), voices.len(), "{provider}/{lang} has duplicate ids");
        }
    }

    #[test]
    fn test_google_falls_back_to_default_language() {
        let fallback = list_voices("google", "fr");
        assert_eq!(fallback, list_voices("google", DEFAULT_LANGUAGE));
        assert_eq!(fallback[0].id, "vi-VN-Standard-A");
    }

    #[test]
    fn test_elevenlabs_ignores_language() {
        assert_eq!(list_voices("elevenlabs", "ja"), list_voices("elevenlabs", "vi"));
        assert_eq!(list_voices("elevenlabs", "vi").len(), 6);
    }

    #[test]
    fn test_unknown_provider_is_empty() {
        assert!(list_voices("azure", "vi").is_empty());
        assert_eq!(default_voice("azure", "vi"), "");
        // 名称区分大小写
        assert!(list_voices("Google", "vi").is_empty());
    }

    #[test]
    fn test_default_voice_is_first_listed() {
        for (provider, lang) in supported_pairs() {
            assert_eq!(default_voice(provider, lang), list_voices(provider, lang)[0].id);
        }
        assert_eq!(default_voice("google", "en"), "en-US-Neural2-A");
        assert_eq!(default_voice("elevenlabs", "vi"), "adam");
    }

    #[test]
    fn test_build_voice_config_does_not_validate() {
        let config = build_voice_config("elevenlabs", "nobody", "xx");
        assert_eq!(config.provider, "elevenlabs");
        assert_eq!(config.voice_id, "nobody");
        assert_eq!(config.language_code, "xx");
    }

    #[test]
    fn test_providers_listing() {
        assert_eq!(
            providers(),
            vec![("google", "Google TTS"), ("elevenlabs", "ElevenLabs")]
        );
        assert!(languages(Provider::ElevenLabs).is_empty());
        assert_eq!(languages(Provider::Google), vec!["vi", "en", "ja", "ko", "zh"]);
    }
}
