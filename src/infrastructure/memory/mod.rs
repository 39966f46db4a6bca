//! Memory Layer - In-Memory Adapters
//!
//! 端口的内存实现，供处理器测试与嵌入调用使用

mod artifact_store;
mod sheet_source;

pub use artifact_store::InMemoryArtifactStorage;
pub use sheet_source::StaticSheetSource;
