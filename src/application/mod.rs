//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SheetSource、ArtifactStorage、RecipeBook、Confirm）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{PatchFileHandler, PatchFileResponse, PatchStatus, SyncPromptsHandler, SyncPromptsResponse},
    PatchFile, SyncPrompts, DEFAULT_PROMPTS_BACKUP_SUFFIX,
};

pub use error::ApplicationError;

pub use ports::{
    backup_path, ArtifactStoragePort, ConfirmPort, FetchError, FixedAnswer, RecipeBookPort,
    RecipeError, SheetSourcePort, StorageError,
};

pub use queries::{
    handlers::{
        DefaultVoiceResponse, ListRecipesHandler, ProviderResponse, RecipeSummary,
        VoiceCatalogHandler, VoiceListResponse,
    },
    BuildVoiceConfig, GetDefaultVoice, ListProviders, ListRecipes, ListVoices,
};
