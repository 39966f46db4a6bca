//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Voice Context: TTS 音色目录
//! - Prompt Context: Domain / Topic / Prompt 配置表
//! - Patch Context: 源文件补丁配方

pub mod patch;
pub mod prompts;
pub mod voice;
