//! Patch Context - 单条改写规则
//!
//! 三种规则都是字面量匹配（不是正则），并且在校验通过后是幂等的：
//! 对已经改写过的内容再次应用不会产生变化。

use serde::{Deserialize, Serialize};

use super::PatchError;

/// 行过滤规则中的一个分支
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAction {
    /// 行中包含该文本时使用此分支
    pub contains: String,
    /// 替换后的行内容（不含缩进）
    pub replace_with: String,
}

/// 改写规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatchRule {
    /// 全文替换所有出现
    Replace {
        name: String,
        search: String,
        replace: String,
    },

    /// 在锚点之后插入文本（已插入过的位置跳过）
    InsertAfter {
        name: String,
        anchor: String,
        text: String,
    },

    /// 包含 marker 的行整体替换，保留缩进与换行符
    LineFilter {
        name: String,
        marker: String,
        #[serde(default)]
        actions: Vec<LineAction>,
        fallback: String,
    },
}

impl PatchRule {
    pub fn name(&self) -> &str {
        match self {
            Self::Replace { name, .. }
            | Self::InsertAfter { name, .. }
            | Self::LineFilter { name, .. } => name,
        }
    }

    /// 校验规则，保证幂等
    pub fn validate(&self) -> Result<(), PatchError> {
        let invalid = |reason: &str| PatchError::InvalidRule {
            rule: self.name().to_string(),
            reason: reason.to_string(),
        };

        if self.name().trim().is_empty() {
            return Err(PatchError::EmptyName);
        }

        match self {
            Self::Replace {
                search, replace, ..
            } => {
                if search.is_empty() {
                    return Err(invalid("search text is empty"));
                }
                if replace.contains(search.as_str()) {
                    return Err(invalid("replacement contains the search text"));
                }
                if overlaps(search, replace) {
                    return Err(invalid("replacement overlaps the search text"));
                }
            }
            Self::InsertAfter { anchor, text, .. } => {
                if anchor.is_empty() || text.is_empty() {
                    return Err(invalid("anchor and text must not be empty"));
                }
                if text.contains(anchor.as_str()) {
                    return Err(invalid("inserted text contains the anchor"));
                }
            }
            Self::LineFilter {
                marker,
                actions,
                fallback,
                ..
            } => {
                if marker.is_empty() {
                    return Err(invalid("marker is empty"));
                }
                if actions.iter().any(|a| a.contains.is_empty()) {
                    return Err(invalid("line action pattern is empty"));
                }
                let replacements = actions
                    .iter()
                    .map(|a| a.replace_with.as_str())
                    .chain(std::iter::once(fallback.as_str()));
                for line in replacements {
                    if line.contains(marker.as_str()) {
                        return Err(invalid("replacement line contains the marker"));
                    }
                    if line.contains('\n') {
                        return Err(invalid("replacement line spans multiple lines"));
                    }
                }
            }
        }

        Ok(())
    }

    /// 应用规则，返回新内容与改写次数
    pub fn apply(&self, content: &str) -> (String, usize) {
        match self {
            Self::Replace {
                search, replace, ..
            } => {
                let count = content.matches(search.as_str()).count();
                if count == 0 {
                    (content.to_string(), 0)
                } else {
                    (content.replace(search.as_str(), replace), count)
                }
            }
            Self::InsertAfter { anchor, text, .. } => insert_after(content, anchor, text),
            Self::LineFilter {
                marker,
                actions,
                fallback,
                ..
            } => filter_lines(content, marker, actions, fallback),
        }
    }
}

/// 替换文本与周围内容拼接后能否重新组成 search
///
/// replace 是 search 的子串，或 search 的真后缀是 replace 的前缀，
/// 或 search 的真前缀是 replace 的后缀。空的 replace 无法静态判断。
fn overlaps(search: &str, replace: &str) -> bool {
    if replace.is_empty() {
        return false;
    }
    if search.contains(replace) {
        return true;
    }
    search.char_indices().skip(1).any(|(k, _)| {
        replace.starts_with(&search[k..]) || replace.ends_with(&search[..k])
    })
}

fn insert_after(content: &str, anchor: &str, text: &str) -> (String, usize) {
    let mut output = String::with_capacity(content.len());
    let mut last = 0;
    let mut count = 0;

    for (index, _) in content.match_indices(anchor) {
        let end = index + anchor.len();
        output.push_str(&content[last..end]);
        last = end;
        if !content[end..].starts_with(text) {
            output.push_str(text);
            count += 1;
        }
    }
    output.push_str(&content[last..]);

    (output, count)
}

fn filter_lines(
    content: &str,
    marker: &str,
    actions: &[LineAction],
    fallback: &str,
) -> (String, usize) {
    let mut output = String::with_capacity(content.len());
    let mut count = 0;

    for line in content.split_inclusive('\n') {
        let body = line.trim_end_matches(['\r', '\n']);
        if !body.contains(marker) {
            output.push_str(line);
            continue;
        }

        let ending = &line[body.len()..];
        let indent_len = body.len() - body.trim_start().len();
        let replacement = actions
            .iter()
            .find(|action| body.contains(action.contains.as_str()))
            .map_or(fallback, |action| action.replace_with.as_str());

        output.push_str(&body[..indent_len]);
        output.push_str(replacement);
        output.push_str(ending);
        count += 1;
    }

    (output, count)
}
