//! Confirm Port - 写入前的交互确认

/// Confirm Port
pub trait ConfirmPort: Send + Sync {
    /// 提出 yes/no 问题，返回是否同意
    fn confirm(&self, question: &str) -> bool;
}

/// 固定回答，用于 `--yes` 与测试
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl ConfirmPort for FixedAnswer {
    fn confirm(&self, question: &str) -> bool {
        tracing::debug!(question, answer = self.0, "Confirmation answered automatically");
        self.0
    }
}
