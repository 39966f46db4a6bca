//! Stdin Confirm - 终端交互确认

use std::io::{self, BufRead, Write};

use crate::application::ports::ConfirmPort;

/// 从标准输入读取 yes/no；读取失败或空输入视为拒绝
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl StdinConfirm {
    pub fn new() -> Self {
        Self
    }
}

impl ConfirmPort for StdinConfirm {
    fn confirm(&self, question: &str) -> bool {
        let mut stdout = io::stdout();
        if write!(stdout, "{} [y/N]: ", question)
            .and_then(|_| stdout.flush())
            .is_err()
        {
            return false;
        }

        let mut buf = String::new();
        match io::stdin().lock().read_line(&mut buf) {
            Ok(_) => is_yes(&buf),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  YES \r\n"));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }
}
