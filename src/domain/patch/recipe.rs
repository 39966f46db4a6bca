//! Patch Context - 补丁配方
//!
//! 一个配方是针对某个源文件的一组有序规则。规则之间相互独立：
//! 某条规则找不到匹配时记为“已修复”，后续规则照常执行，不做回滚。

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use super::{PatchError, PatchRule};

/// 补丁配方
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRecipe {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// 默认目标文件（可被命令行覆盖）
    #[serde(default)]
    pub target: Option<PathBuf>,

    /// 备份后缀原因，如 `fix_style` → `.backup_fix_style`；
    /// 未设置时使用时间戳
    #[serde(default)]
    pub backup_reason: Option<String>,

    #[serde(default, rename = "rule")]
    pub rules: Vec<PatchRule>,
}

/// 单条规则的执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixStatus {
    Applied { occurrences: usize },
    /// 没有找到匹配，视为已经修复过
    AlreadyFixed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixReport {
    pub rule: String,
    pub status: FixStatus,
}

impl FixReport {
    pub fn is_applied(&self) -> bool {
        matches!(self.status, FixStatus::Applied { .. })
    }
}

/// 配方执行结果
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub content: String,
    pub fixes: Vec<FixReport>,
}

impl PatchOutcome {
    /// 实际生效的规则数
    pub fn applied_count(&self) -> usize {
        self.fixes.iter().filter(|f| f.is_applied()).count()
    }

    pub fn has_changes(&self) -> bool {
        self.applied_count() > 0
    }
}

impl PatchRecipe {
    pub fn validate(&self) -> Result<(), PatchError> {
        if self.name.trim().is_empty() {
            return Err(PatchError::EmptyName);
        }
        if self.rules.is_empty() {
            return Err(PatchError::NoRules(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            rule.validate()?;
            if !seen.insert(rule.name()) {
                return Err(PatchError::DuplicateRule {
                    recipe: self.name.clone(),
                    rule: rule.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// 按顺序应用全部规则
    pub fn apply(&self, content: &str) -> PatchOutcome {
        let mut current = content.to_string();
        let mut fixes = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let (next, occurrences) = rule.apply(&current);
            let status = if occurrences == 0 {
                tracing::info!(recipe = %self.name, rule = rule.name(), "Pattern not found, already fixed");
                FixStatus::AlreadyFixed
            } else {
                tracing::info!(recipe = %self.name, rule = rule.name(), occurrences, "Fix applied");
                FixStatus::Applied { occurrences }
            };
            current = next;
            fixes.push(FixReport {
                rule: rule.name().to_string(),
                status,
            });
        }

        PatchOutcome {
            content: current,
            fixes,
        }
    }

    /// 对改写后的内容再次检查，返回仍会命中的第一条规则
    pub fn unstable_rule(&self, patched: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.apply(patched).1 > 0)
            .map(PatchRule::name)
    }

    /// 备份文件后缀
    pub fn backup_suffix(&self, now: DateTime<Local>) -> String {
        match &self.backup_reason {
            Some(reason) if !reason.trim().is_empty() => format!(".backup_{}", reason.trim()),
            _ => format!(".backup_{}", now.format("%Y%m%d_%H%M%S")),
        }
    }
}
