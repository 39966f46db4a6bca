//! Prompt Context - 列识别
//!
//! 表格没有固定的列名约定，按表头关键字（中越英混合）识别列的用途。
//! 每个表头按 domain → topic → prompt 的顺序匹配，最多归入一类。

/// 列的用途
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Domain,
    Topic,
    Prompt,
}

const DOMAIN_HINTS: &[&str] = &["lĩnh vực", "domain", "linh vuc"];
const TOPIC_HINTS: &[&str] = &["chủ đề", "topic", "chu de"];
const PROMPT_HINTS: &[&str] = &["prompt", "system", "mô tả"];

/// 识别单个表头的用途（忽略大小写的子串匹配）
pub fn classify_header(header: &str) -> Option<ColumnKind> {
    let header = header.to_lowercase();
    let matches = |hints: &[&str]| hints.iter().any(|hint| header.contains(hint));

    if matches(DOMAIN_HINTS) {
        Some(ColumnKind::Domain)
    } else if matches(TOPIC_HINTS) {
        Some(ColumnKind::Topic)
    } else if matches(PROMPT_HINTS) {
        Some(ColumnKind::Prompt)
    } else {
        None
    }
}

/// 各用途对应的列下标
///
/// 多个表头命中同一用途时取最右边的一列，被覆盖的列记录警告
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub domain: Option<usize>,
    pub topic: Option<usize>,
    pub prompt: Option<usize>,
}

impl ColumnMap {
    pub fn resolve(headers: &[String]) -> Self {
        let mut map = Self::default();

        for (index, header) in headers.iter().enumerate() {
            let Some(kind) = classify_header(header) else {
                continue;
            };
            let slot = match kind {
                ColumnKind::Domain => &mut map.domain,
                ColumnKind::Topic => &mut map.topic,
                ColumnKind::Prompt => &mut map.prompt,
            };
            if let Some(existing) = slot.replace(index) {
                tracing::warn!(
                    kind = ?kind,
                    used = %header,
                    ignored = %headers[existing],
                    "Multiple columns match the same field, keeping the last one"
                );
            }
        }

        tracing::debug!(
            domain = ?map.domain,
            topic = ?map.topic,
            prompt = ?map.prompt,
            "Resolved sheet columns"
        );

        map
    }

    /// domain 与 topic 列都已识别
    pub fn is_usable(&self) -> bool {
        self.domain.is_some() && self.topic.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_bilingual_headers() {
        assert_eq!(classify_header("Domain"), Some(ColumnKind::Domain));
        assert_eq!(classify_header("LĨNH VỰC"), Some(ColumnKind::Domain));
        assert_eq!(classify_header("Linh vuc"), Some(ColumnKind::Domain));
        assert_eq!(classify_header("Chủ đề"), Some(ColumnKind::Topic));
        assert_eq!(classify_header("Topic name"), Some(ColumnKind::Topic));
        assert_eq!(classify_header("System Prompt"), Some(ColumnKind::Prompt));
        assert_eq!(classify_header("Mô tả"), Some(ColumnKind::Prompt));
        assert_eq!(classify_header("Ghi chú"), None);
    }

    #[test]
    fn test_domain_takes_priority_over_other_kinds() {
        // 同时包含 domain 与 prompt 关键字
        assert_eq!(classify_header("Domain prompt"), Some(ColumnKind::Domain));
        assert_eq!(classify_header("Topic description (mô tả)"), Some(ColumnKind::Topic));
    }

    #[test]
    fn test_resolve_columns() {
        let map = ColumnMap::resolve(&headers(&["STT", "Lĩnh vực", "Chủ đề", "System Prompt"]));
        assert_eq!(map.domain, Some(1));
        assert_eq!(map.topic, Some(2));
        assert_eq!(map.prompt, Some(3));
        assert!(map.is_usable());
    }

    #[test]
    fn test_last_matching_column_wins() {
        let map = ColumnMap::resolve(&headers(&["Domain", "Topic", "Prompt", "System prompt v2"]));
        assert_eq!(map.prompt, Some(3));

        let map = ColumnMap::resolve(&headers(&["Lĩnh vực", "Domain (en)", "Topic"]));
        assert_eq!(map.domain, Some(1));
    }

    #[test]
    fn test_missing_topic_column_is_unusable() {
        let map = ColumnMap::resolve(&headers(&["Domain", "Prompt"]));
        assert!(!map.is_usable());
    }
}
