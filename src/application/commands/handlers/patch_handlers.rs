//! Patch Command Handlers

use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::PatchFile;
use crate::application::error::ApplicationError;
use crate::application::ports::{ArtifactStoragePort, ConfirmPort, RecipeBookPort, StorageError};
use crate::domain::patch::{FixReport, PatchError};

// ============================================================================
// PatchFile
// ============================================================================

/// 补丁执行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStatus {
    /// 已备份并写入
    Written,
    /// 没有任何规则命中，文件未改动
    NoChanges,
    /// dry-run，仅报告
    DryRun,
    /// 用户取消
    Declined,
}

/// 补丁执行结果
#[derive(Debug, Clone)]
pub struct PatchFileResponse {
    pub recipe: String,
    pub target: PathBuf,
    pub fixes: Vec<FixReport>,
    pub backup: Option<PathBuf>,
    pub status: PatchStatus,
}

impl PatchFileResponse {
    pub fn applied_count(&self) -> usize {
        self.fixes.iter().filter(|f| f.is_applied()).count()
    }
}

/// PatchFile Handler
pub struct PatchFileHandler {
    recipes: Arc<dyn RecipeBookPort>,
    storage: Arc<dyn ArtifactStoragePort>,
    confirm: Arc<dyn ConfirmPort>,
    /// 命令与配方都未指定目标时使用
    default_target: PathBuf,
}

impl PatchFileHandler {
    pub fn new(
        recipes: Arc<dyn RecipeBookPort>,
        storage: Arc<dyn ArtifactStoragePort>,
        confirm: Arc<dyn ConfirmPort>,
        default_target: impl Into<PathBuf>,
    ) -> Self {
        Self {
            recipes,
            storage,
            confirm,
            default_target: default_target.into(),
        }
    }

    pub async fn handle(&self, command: PatchFile) -> Result<PatchFileResponse, ApplicationError> {
        let recipe = self
            .recipes
            .get(&command.recipe)
            .ok_or_else(|| ApplicationError::not_found("Recipe", command.recipe.clone()))?;

        let target = command
            .target
            .or_else(|| recipe.target.clone())
            .unwrap_or_else(|| self.default_target.clone());

        if !self.storage.exists(&target).await {
            return Err(StorageError::FileNotFound(target.display().to_string()).into());
        }

        let original = self.storage.read_to_string(&target).await?;
        let outcome = recipe.apply(&original);

        let respond = |status, backup| PatchFileResponse {
            recipe: recipe.name.clone(),
            target: target.clone(),
            fixes: outcome.fixes.clone(),
            backup,
            status,
        };

        if !outcome.has_changes() {
            tracing::info!(recipe = %recipe.name, target = %target.display(), "No changes needed");
            return Ok(respond(PatchStatus::NoChanges, None));
        }

        if let Some(rule) = recipe.unstable_rule(&outcome.content) {
            tracing::warn!(recipe = %recipe.name, rule, "Patched content would change again");
            return Err(PatchError::NotIdempotent {
                recipe: recipe.name.clone(),
                rule: rule.to_string(),
            }
            .into());
        }

        if command.dry_run {
            return Ok(respond(PatchStatus::DryRun, None));
        }

        let question = format!(
            "Apply {} fix(es) from '{}' to {}?",
            outcome.applied_count(),
            recipe.name,
            target.display()
        );
        if !self.confirm.confirm(&question) {
            tracing::info!(recipe = %recipe.name, "Patch declined");
            return Ok(respond(PatchStatus::Declined, None));
        }

        let backup = self
            .storage
            .backup(&target, &recipe.backup_suffix(Local::now()))
            .await?;
        self.storage.write(&target, &outcome.content).await?;

        tracing::info!(
            recipe = %recipe.name,
            target = %target.display(),
            applied = outcome.applied_count(),
            backup = ?backup,
            "Patch written"
        );

        Ok(respond(PatchStatus::Written, backup))
    }
}
