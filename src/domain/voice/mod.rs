//! Voice Context - 音色目录上下文
//!
//! 职责:
//! - TTS 提供方与音色的静态目录
//! - 默认音色选择
//! - 音色配置构造

mod catalog;
mod value_objects;

pub use catalog::{
    build_voice_config, default_voice, languages, list_voices, providers, voices_for,
    DEFAULT_LANGUAGE,
};
pub use value_objects::{Provider, VoiceConfig, VoiceRecord};
