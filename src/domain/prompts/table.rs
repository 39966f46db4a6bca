//! Prompt Context - Domain → Topic → Prompt 表

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 扁平化后的一条记录
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptEntry {
    pub domain: String,
    pub topic: String,
    pub system_prompt: String,
}

/// Domain → Topic → System Prompt 映射
///
/// 不变量:
/// - domain / topic 为去除首尾空白后的非空字符串
/// - 保持首次出现的顺序；重复的 (domain, topic) 只覆盖 prompt，不改变位置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainPromptTable {
    domains: IndexMap<String, IndexMap<String, String>>,
}

impl DomainPromptTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或覆盖一条 prompt，返回被覆盖的旧值
    ///
    /// domain 或 topic 为空时忽略并返回 None
    pub fn insert(
        &mut self,
        domain: impl Into<String>,
        topic: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Option<String> {
        let domain = domain.into().trim().to_string();
        let topic = topic.into().trim().to_string();
        if domain.is_empty() || topic.is_empty() {
            return None;
        }
        self.domains
            .entry(domain)
            .or_default()
            .insert(topic, prompt.into())
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    /// 某个 domain 下的全部 topic，domain 不存在时为空
    pub fn topics(&self, domain: &str) -> Vec<&str> {
        self.domains
            .get(domain)
            .map(|topics| topics.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// 查询 prompt，不存在时返回空字符串
    pub fn prompt(&self, domain: &str, topic: &str) -> &str {
        self.domains
            .get(domain)
            .and_then(|topics| topics.get(topic))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn contains(&self, domain: &str, topic: &str) -> bool {
        self.domains
            .get(domain)
            .map_or(false, |topics| topics.contains_key(topic))
    }

    /// 按顺序迭代 (domain, topics)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexMap<String, String>)> {
        self.domains.iter().map(|(d, t)| (d.as_str(), t))
    }

    /// 扁平化为记录列表
    pub fn entries(&self) -> Vec<PromptEntry> {
        self.domains
            .iter()
            .flat_map(|(domain, topics)| {
                topics.iter().map(move |(topic, prompt)| PromptEntry {
                    domain: domain.clone(),
                    topic: topic.clone(),
                    system_prompt: prompt.clone(),
                })
            })
            .collect()
    }

    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    pub fn topic_count(&self) -> usize {
        self.domains.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// 与旧表比较，得出变更摘要（self 为新表）
    pub fn changes_since(&self, previous: &DomainPromptTable) -> TableChanges {
        let mut changes = TableChanges::default();

        for (domain, topics) in self.iter() {
            if !previous.domains.contains_key(domain) {
                changes.added_domains.push(domain.to_string());
            }
            for (topic, prompt) in topics {
                if !previous.contains(domain, topic) {
                    changes.added_topics.push((domain.to_string(), topic.clone()));
                } else if previous.prompt(domain, topic) != prompt.as_str() {
                    changes.changed_prompts.push((domain.to_string(), topic.clone()));
                }
            }
        }

        for (domain, topics) in previous.iter() {
            if !self.domains.contains_key(domain) {
                changes.removed_domains.push(domain.to_string());
            }
            for topic in topics.keys() {
                if !self.contains(domain, topic) {
                    changes.removed_topics.push((domain.to_string(), topic.clone()));
                }
            }
        }

        changes
    }
}

/// 两张表之间的差异
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableChanges {
    pub added_domains: Vec<String>,
    pub removed_domains: Vec<String>,
    pub added_topics: Vec<(String, String)>,
    pub removed_topics: Vec<(String, String)>,
    pub changed_prompts: Vec<(String, String)>,
}

impl TableChanges {
    pub fn is_empty(&self) -> bool {
        self.added_domains.is_empty()
            && self.removed_domains.is_empty()
            && self.added_topics.is_empty()
            && self.removed_topics.is_empty()
            && self.changed_prompts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DomainPromptTable {
        let mut table = DomainPromptTable::new();
        table.insert("Finance", "Loans", "Help with loans");
        table.insert("Finance", "Savings", "");
        table.insert("Health", "Sleep", "Sleep tips");
        table
    }

    #[test]
    fn test_accessors() {
        let table = sample();
        assert_eq!(table.domains().collect::<Vec<_>>(), vec!["Finance", "Health"]);
        assert_eq!(table.topics("Finance"), vec!["Loans", "Savings"]);
        assert!(table.topics("Missing").is_empty());
        assert_eq!(table.prompt("Health", "Sleep"), "Sleep tips");
        assert_eq!(table.prompt("Health", "Diet"), "");
        assert_eq!(table.domain_count(), 2);
        assert_eq!(table.topic_count(), 3);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut table = sample();
        let previous = table.insert("Finance", "Loans", "Updated");
        assert_eq!(previous.as_deref(), Some("Help with loans"));
        assert_eq!(table.topics("Finance"), vec!["Loans", "Savings"]);
        assert_eq!(table.prompt("Finance", "Loans"), "Updated");
    }

    #[test]
    fn test_insert_trims_and_rejects_empty_keys() {
        let mut table = DomainPromptTable::new();
        table.insert("  Finance ", " Loans ", "p");
        assert!(table.contains("Finance", "Loans"));
        assert_eq!(table.insert("", "Loans", "p"), None);
        assert_eq!(table.insert("Finance", "   ", "p"), None);
        assert_eq!(table.topic_count(), 1);
    }

    #[test]
    fn test_entries_flatten_in_order() {
        let entries = sample().entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0],
            PromptEntry {
                domain: "Finance".into(),
                topic: "Loans".into(),
                system_prompt: "Help with loans".into(),
            }
        );
        assert_eq!(entries[2].topic, "Sleep");
    }

    #[test]
    fn test_changes_since() {
        let old = sample();
        let mut new = DomainPromptTable::new();
        new.insert("Finance", "Loans", "Rewritten");
        new.insert("Finance", "Savings", "");
        new.insert("Travel", "Visa", "Visa help");

        let changes = new.changes_since(&old);
        assert_eq!(changes.added_domains, vec!["Travel"]);
        assert_eq!(changes.removed_domains, vec!["Health"]);
        assert_eq!(changes.added_topics, vec![("Travel".to_string(), "Visa".to_string())]);
        assert_eq!(changes.removed_topics, vec![("Health".to_string(), "Sleep".to_string())]);
        assert_eq!(changes.changed_prompts, vec![("Finance".to_string(), "Loans".to_string())]);
        assert!(new.changes_since(&new).is_empty());
    }
}
