//! Prompt Command Handlers

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::SyncPrompts;
use crate::application::error::ApplicationError;
use crate::application::ports::{ArtifactStoragePort, SheetSourcePort};
use crate::domain::prompts::{
    extract_with_stats, parse_source, render_source, DomainPromptTable, ExtractStats, Provenance,
    TableChanges,
};

// ============================================================================
// SyncPrompts
// ============================================================================

/// 生成结果
#[derive(Debug, Clone)]
pub struct SyncPromptsResponse {
    pub output_path: PathBuf,
    pub table: DomainPromptTable,
    pub stats: ExtractStats,
    /// 与旧文件的差异；旧文件不存在或无法解析时为 None
    pub changes: Option<TableChanges>,
    pub backup: Option<PathBuf>,
    pub written: bool,
}

/// SyncPrompts Handler
///
/// fetch → extract → render → backup → write，任一步失败即返回
pub struct SyncPromptsHandler {
    source: Arc<dyn SheetSourcePort>,
    storage: Arc<dyn ArtifactStoragePort>,
}

impl SyncPromptsHandler {
    pub fn new(source: Arc<dyn SheetSourcePort>, storage: Arc<dyn ArtifactStoragePort>) -> Self {
        Self { source, storage }
    }

    pub async fn handle(&self, command: SyncPrompts) -> Result<SyncPromptsResponse, ApplicationError> {
        let provenance = Provenance::new(self.source.describe());
        tracing::info!(source = %provenance.source, "Fetching sheet rows");

        let rows = self.source.fetch_rows().await?;
        tracing::info!(rows = rows.len(), columns = rows.headers().len(), "Sheet loaded");

        let extraction = extract_with_stats(&rows);
        if !extraction.columns.is_usable() {
            return Err(ApplicationError::validation(format!(
                "Cannot find domain/topic columns in headers: {:?}",
                rows.headers()
            )));
        }
        if extraction.table.is_empty() {
            return Err(ApplicationError::validation(
                "Sheet contains no rows with both domain and topic",
            ));
        }

        let source = render_source(&extraction.table, &provenance);
        let changes = self.previous_table(&command).await.map(|previous| {
            extraction.table.changes_since(&previous)
        });

        if command.dry_run {
            tracing::info!(path = %command.output_path.display(), "Dry run, nothing written");
            return Ok(SyncPromptsResponse {
                output_path: command.output_path,
                table: extraction.table,
                stats: extraction.stats,
                changes,
                backup: None,
                written: false,
            });
        }

        let backup = self
            .storage
            .backup(&command.output_path, &command.backup_suffix)
            .await?;
        if let Some(backup) = &backup {
            tracing::info!(backup = %backup.display(), "Previous config backed up");
        }

        self.storage.write(&command.output_path, &source).await?;
        tracing::info!(
            path = %command.output_path.display(),
            domains = extraction.table.domain_count(),
            topics = extraction.table.topic_count(),
            "Prompt config generated"
        );

        Ok(SyncPromptsResponse {
            output_path: command.output_path,
            table: extraction.table,
            stats: extraction.stats,
            changes,
            backup,
            written: true,
        })
    }

    /// 读取现有生成文件中的表，用于变更摘要
    async fn previous_table(&self, command: &SyncPrompts) -> Option<DomainPromptTable> {
        if !self.storage.exists(&command.output_path).await {
            return None;
        }
        let content = match self.storage.read_to_string(&command.output_path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot read existing config, skipping change summary");
                return None;
            }
        };
        match parse_source(&content) {
            Ok(table) => Some(table),
            Err(e) => {
                tracing::warn!(error = %e, "Existing config is not parseable, skipping change summary");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::FetchError;
    use crate::domain::prompts::SheetRows;
    use crate::infrastructure::adapters::parse_csv;
    use crate::infrastructure::memory::{InMemoryArtifactStorage, StaticSheetSource};
    use async_trait::async_trait;
    use std::path::Path;

    const OUTPUT: &str = "services/domain_prompts.py";

    struct FailingSource;

    #[async_trait]
    impl SheetSourcePort for FailingSource {
        async fn fetch_rows(&self) -> Result<SheetRows, FetchError> {
            Err(FetchError::HttpStatus {
                status: 404,
                body: "not published".into(),
            })
        }

        fn describe(&self) -> String {
            "failing".into()
        }
    }

    /// 未发布的表格：导出地址返回登录页
    struct SignInPageSource;

    #[async_trait]
    impl SheetSourcePort for SignInPageSource {
        async fn fetch_rows(&self) -> Result<SheetRows, FetchError> {
            parse_csv("<!DOCTYPE html><html><head><title>Sign in</title></head></html>")
        }

        fn describe(&self) -> String {
            "sign-in page".into()
        }
    }

    fn finance_sheet() -> StaticSheetSource {
        StaticSheetSource::from_cells(
            &["Domain", "Topic", "Prompt"],
            &[
                &["Finance", "Loans", "Help with loans"],
                &["Finance", "Loans", "Updated"],
                &["", "X", "Y"],
            ],
        )
    }

    #[tokio::test]
    async fn test_generates_config_file() {
        let storage = Arc::new(InMemoryArtifactStorage::new());
        let handler = SyncPromptsHandler::new(Arc::new(finance_sheet()), storage.clone());

        let response = handler.handle(SyncPrompts::new(OUTPUT)).await.unwrap();

        assert!(response.written);
        assert_eq!(response.backup, None);
        assert_eq!(response.changes, None);
        assert_eq!(response.stats.rows_skipped, 1);
        assert_eq!(response.table.prompt("Finance", "Loans"), "Updated");

        let written = storage.get(Path::new(OUTPUT)).unwrap();
        assert_eq!(parse_source(&written).unwrap(), response.table);
    }

    #[tokio::test]
    async fn test_existing_file_is_backed_up_and_diffed() {
        let mut old = DomainPromptTable::new();
        old.insert("Finance", "Loans", "Help with loans");
        old.insert("Health", "Sleep", "");
        let old_source = render_source(&old, &Provenance::new("old"));

        let storage = Arc::new(InMemoryArtifactStorage::new().with_file(OUTPUT, old_source.clone()));
        let handler = SyncPromptsHandler::new(Arc::new(finance_sheet()), storage.clone());

        let response = handler.handle(SyncPrompts::new(OUTPUT)).await.unwrap();

        let backup = response.backup.unwrap();
        assert_eq!(
            backup,
            PathBuf::from("services/domain_prompts.py.backup_before_sheet_extract")
        );
        assert_eq!(storage.get(&backup).unwrap(), old_source);

        let changes = response.changes.unwrap();
        assert_eq!(changes.removed_domains, vec!["Health"]);
        assert_eq!(changes.changed_prompts, vec![("Finance".to_string(), "Loans".to_string())]);
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let storage = Arc::new(InMemoryArtifactStorage::new());
        let handler = SyncPromptsHandler::new(Arc::new(finance_sheet()), storage.clone());

        let mut command = SyncPrompts::new(OUTPUT);
        command.dry_run = true;
        let response = handler.handle(command).await.unwrap();

        assert!(!response.written);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_without_writing() {
        let storage = Arc::new(InMemoryArtifactStorage::new().with_file(OUTPUT, "keep me"));
        let handler = SyncPromptsHandler::new(Arc::new(FailingSource), storage.clone());

        let err = handler.handle(SyncPrompts::new(OUTPUT)).await.unwrap_err();

        assert!(err.is_fetch_failure());
        assert_eq!(storage.get(Path::new(OUTPUT)).as_deref(), Some("keep me"));
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_sign_in_page_is_a_fetch_failure() {
        let storage = Arc::new(InMemoryArtifactStorage::new().with_file(OUTPUT, "keep me"));
        let handler = SyncPromptsHandler::new(Arc::new(SignInPageSource), storage.clone());

        let err = handler.handle(SyncPrompts::new(OUTPUT)).await.unwrap_err();

        assert!(err.is_fetch_failure());
        assert!(matches!(err, ApplicationError::Fetch(FetchError::NotCsv(_))));
        assert_eq!(storage.get(Path::new(OUTPUT)).as_deref(), Some("keep me"));
    }

    #[tokio::test]
    async fn test_unrecognized_columns_are_rejected() {
        let source = StaticSheetSource::from_cells(&["A", "B"], &[&["x", "y"]]);
        let storage = Arc::new(InMemoryArtifactStorage::new());
        let handler = SyncPromptsHandler::new(Arc::new(source), storage.clone());

        let err = handler.handle(SyncPrompts::new(OUTPUT)).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert!(storage.is_empty());
    }
}
