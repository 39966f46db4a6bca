//! Prompt Context - 生成 / 读取 `domain_prompts.py`
//!
//! GUI 通过生成文件中的四个函数读取数据:
//! `get_all_domains` / `get_topics_for_domain` / `get_system_prompt` / `get_all_prompts`

use std::fmt::Write as _;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use super::DomainPromptTable;

/// 生成文件中映射字面量的变量名
pub const TABLE_IDENT: &str = "DOMAIN_PROMPTS";

/// 读取已生成文件时的错误
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("`DOMAIN_PROMPTS` assignment not found")]
    MissingTable,

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// 数据来源说明，写入文件头
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// 来源描述，如表格编辑链接或本地 CSV 路径
    pub source: String,
}

impl Provenance {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// 转义为 Python 双引号字符串内容
pub fn escape_str(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const ACCESSORS: &str = r#"
def get_all_domains():
    """Get list of all domain names"""
    return list(DOMAIN_PROMPTS.keys())


def get_topics_for_domain(domain):
    """Get list of topics for a specific domain"""
    return list(DOMAIN_PROMPTS.get(domain, {}).keys())


def get_system_prompt(domain, topic):
    """Get system prompt for a specific domain and topic"""
    return DOMAIN_PROMPTS.get(domain, {}).get(topic, "")


def get_all_prompts():
    """Get all domain-topic-prompt combinations"""
    result = []
    for domain, topics in DOMAIN_PROMPTS.items():
        for topic, prompt in topics.items():
            result.append({
                "domain": domain,
                "topic": topic,
                "system_prompt": prompt
            })
    return result
"#;

/// 生成 Python 源文件
///
/// 输出只依赖表内容与来源说明，相同输入得到相同字节
pub fn render_source(table: &DomainPromptTable, provenance: &Provenance) -> String {
    let mut code = String::new();

    code.push_str("# -*- coding: utf-8 -*-\n");
    code.push_str("\"\"\"\n");
    code.push_str("Domain-specific system prompts for video generation\n");
    // 文档字符串按普通字符串字面量转义：反斜杠、引号与换行
    let _ = writeln!(code, "Auto-generated from: {}", escape_str(&provenance.source));
    code.push_str("Do not edit by hand; regenerate with `studio-tools sync-prompts`.\n");
    code.push_str("\"\"\"\n\n");

    code.push_str("# Domain → Topics → System Prompts mapping\n");
    let _ = writeln!(code, "{TABLE_IDENT} = {{");
    for (domain, topics) in table.iter() {
        let _ = writeln!(code, "    \"{}\": {{", escape_str(domain));
        for (topic, prompt) in topics {
            let _ = writeln!(
                code,
                "        \"{}\": \"{}\",",
                escape_str(topic),
                escape_str(prompt)
            );
        }
        code.push_str("    },\n");
    }
    code.push_str("}\n\n");
    code.push_str(ACCESSORS);

    code
}

/// 从生成文件中读回 `DOMAIN_PROMPTS` 字面量
///
/// 支持生成器自身的输出以及少量手工编辑（单引号字符串、注释、尾随逗号）
pub fn parse_source(source: &str) -> Result<DomainPromptTable, RenderError> {
    let start = source
        .match_indices(TABLE_IDENT)
        .map(|(index, _)| index)
        .find(|&index| {
            let at_line_start = index == 0 || source[..index].ends_with('\n');
            let rest = source[index + TABLE_IDENT.len()..].trim_start_matches([' ', '\t']);
            at_line_start && rest.starts_with('=')
        })
        .ok_or(RenderError::MissingTable)?;

    let literal = &source[start..];
    let eq = literal.find('=').ok_or(RenderError::MissingTable)?;
    let line_offset = source[..start].matches('\n').count() + 1;

    let mut parser = LiteralParser::new(&literal[eq + 1..], line_offset);
    parser.parse_table()
}

/// `DOMAIN_PROMPTS` 字面量的递归下降解析器
struct LiteralParser<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(input: &'a str, line: usize) -> Self {
        Self {
            chars: input.chars().peekable(),
            line,
        }
    }

    fn error(&self, message: impl Into<String>) -> RenderError {
        RenderError::Parse {
            line: self.line,
            message: message.into(),
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next();
        if ch == Some('\n') {
            self.line += 1;
        }
        ch
    }

    /// 跳过空白与 `#` 注释
    fn skip_trivia(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.bump();
            } else if ch == '#' {
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), RenderError> {
        self.skip_trivia();
        match self.bump() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(self.error(format!("expected `{expected}`, found `{ch}`"))),
            None => Err(self.error(format!("expected `{expected}`, found end of input"))),
        }
    }

    /// 消费可选的逗号，返回下一个是否为右花括号
    fn entry_separator(&mut self) -> Result<bool, RenderError> {
        self.skip_trivia();
        match self.chars.peek() {
            Some(',') => {
                self.bump();
                self.skip_trivia();
                Ok(self.chars.peek() == Some(&'}'))
            }
            Some('}') => Ok(true),
            Some(&ch) => Err(self.error(format!("expected `,` or `}}`, found `{ch}`"))),
            None => Err(self.error("unterminated mapping")),
        }
    }

    fn parse_table(&mut self) -> Result<DomainPromptTable, RenderError> {
        let mut table = DomainPromptTable::new();
        self.expect('{')?;
        self.skip_trivia();
        if self.chars.peek() == Some(&'}') {
            self.bump();
            return Ok(table);
        }

        loop {
            let domain = self.parse_string()?;
            self.expect(':')?;
            self.expect('{')?;
            self.skip_trivia();
            if self.chars.peek() != Some(&'}') {
                loop {
                    let topic = self.parse_string()?;
                    self.expect(':')?;
                    let prompt = self.parse_string()?;
                    table.insert(domain.clone(), topic, prompt);
                    if self.entry_separator()? {
                        break;
                    }
                }
            }
            self.expect('}')?;
            if self.entry_separator()? {
                break;
            }
        }

        self.expect('}')?;
        Ok(table)
    }

    fn parse_string(&mut self) -> Result<String, RenderError> {
        self.skip_trivia();
        let quote = match self.bump() {
            Some(q @ ('"' | '\'')) => q,
            Some(ch) => return Err(self.error(format!("expected string, found `{ch}`"))),
            None => return Err(self.error("expected string, found end of input")),
        };

        let mut value = String::new();
        loop {
            match self.bump() {
                Some(ch) if ch == quote => return Ok(value),
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('r') => value.push('\r'),
                    Some('t') => value.push('\t'),
                    Some(ch @ ('\\' | '"' | '\'')) => value.push(ch),
                    // Python 保留未知转义
                    Some(ch) => {
                        value.push('\\');
                        value.push(ch);
                    }
                    None => return Err(self.error("unterminated string")),
                },
                Some('\n') | None => return Err(self.error("unterminated string")),
                Some(ch) => value.push(ch),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn provenance() -> Provenance {
        Provenance::new("https://docs.google.com/spreadsheets/d/abc/edit?gid=1#gid=1")
    }

    fn tricky_table() -> DomainPromptTable {
        let mut table = DomainPromptTable::new();
        table.insert("Tài chính", "Vay \"nhanh\"", "Dòng 1\nDòng 2\ttab");
        table.insert("Tài chính", "Tiết kiệm", "");
        table.insert("Path", "Windows", r"C:\videos\new");
        table.insert("Quote's", "single 'quoted'", "#not a comment");
        table
    }

    #[test]
    fn test_escape_str() {
        assert_eq!(escape_str(r#"a"b"#), r#"a\"b"#);
        assert_eq!(escape_str("a\nb"), r"a\nb");
        assert_eq!(escape_str(r"a\b"), r"a\\b");
        assert_eq!(escape_str("plain"), "plain");
    }

    #[test]
    fn test_windows_path_in_docstring_is_escaped() {
        let table = tricky_table();
        let provenance = Provenance::new(r#"CSV file C:\Users\me\"""sheet.csv"#);
        let source = render_source(&table, &provenance);

        assert!(source.contains(r#"Auto-generated from: CSV file C:\\Users\\me\\\"\"\"sheet.csv"#));
        let docstring_start = source.find("\"\"\"\n").unwrap() + 4;
        let docstring_end = source.find("\"\"\"\n\n").unwrap();
        assert!(!source[docstring_start..docstring_end].contains("\"\"\""));
        assert_eq!(parse_source(&source).unwrap(), table);
    }

    #[test]
    fn test_render_layout() {
        let mut table = DomainPromptTable::new();
        table.insert("Finance", "Loans", "Help with loans");
        let source = render_source(&table, &provenance());

        assert!(source.starts_with("# -*- coding: utf-8 -*-\n"));
        assert!(source.contains("Auto-generated from: https://docs.google.com/"));
        assert!(source.contains(
            "DOMAIN_PROMPTS = {\n    \"Finance\": {\n        \"Loans\": \"Help with loans\",\n    },\n}\n"
        ));
        for accessor in [
            "def get_all_domains():",
            "def get_topics_for_domain(domain):",
            "def get_system_prompt(domain, topic):",
            "def get_all_prompts():",
        ] {
            assert!(source.contains(accessor), "missing {accessor}");
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let table = tricky_table();
        assert_eq!(
            render_source(&table, &provenance()),
            render_source(&table, &provenance())
        );
    }

    #[test]
    fn test_render_then_parse_round_trip() {
        let table = tricky_table();
        let parsed = parse_source(&render_source(&table, &provenance())).unwrap();

        let expected: HashSet<_> = table.entries().into_iter().collect();
        let actual: HashSet<_> = parsed.entries().into_iter().collect();
        assert_eq!(actual, expected);
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_empty_table_round_trip() {
        let source = render_source(&DomainPromptTable::new(), &provenance());
        assert!(source.contains("DOMAIN_PROMPTS = {\n}\n"));
        assert!(parse_source(&source).unwrap().is_empty());
    }

    #[test]
    fn test_parse_hand_edited_literal() {
        let source = r#"
# header comment mentioning DOMAIN_PROMPTS
DOMAIN_PROMPTS = {
    # finance first
    'Finance': {'Loans': 'L', "Cards": "C"},
    "Empty": {},
}
"#;
        let table = parse_source(source).unwrap();
        assert_eq!(table.topics("Finance"), vec!["Loans", "Cards"]);
        assert_eq!(table.prompt("Finance", "Cards"), "C");
        // 空 domain 不会进入表
        assert_eq!(table.domain_count(), 1);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_source("OTHER = {}"),
            Err(RenderError::MissingTable)
        ));

        let err = parse_source("DOMAIN_PROMPTS = {\n    \"a\": {\"b\" \"c\"},\n}").unwrap_err();
        match err {
            RenderError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(parse_source("DOMAIN_PROMPTS = {\"a\": {\"b\": \"unterminated}}").is_err());
    }
}
