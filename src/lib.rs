//! Studio Tools - 图生视频工作室的维护工具集
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 静态 TTS 音色目录
//! - Prompt Context: Domain → Topic → Prompt 表的提取、生成与读回
//! - Patch Context: 幂等的源文件改写规则与配方
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SheetSource, ArtifactStorage, RecipeBook, Confirm）
//! - Commands: SyncPrompts, PatchFile
//! - Queries: 音色目录、配方列表
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP 表格客户端、本地 CSV、文件存储、TOML 配方、终端确认
//! - Memory: 端口的内存实现

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
