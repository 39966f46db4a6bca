//! HTTP Sheet Client - 通过 CSV 导出接口读取已发布的表格
//!
//! 实现 SheetSourcePort trait
//!
//! 导出接口:
//! GET {base_url}/spreadsheets/d/{sheet_id}/export?format=csv&gid={gid}
//! Response: text/csv，需要表格已发布或“任何知道链接的人可查看”

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

use super::parse_csv;
use crate::application::ports::{FetchError, SheetSourcePort};
use crate::domain::prompts::SheetRows;

/// HTTP 表格客户端配置
#[derive(Debug, Clone)]
pub struct HttpSheetClientConfig {
    /// 表格服务基础 URL
    pub base_url: String,
    /// 表格 ID
    pub sheet_id: String,
    /// 工作表 gid
    pub gid: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpSheetClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://docs.google.com".to_string(),
            sheet_id: String::new(),
            gid: "0".to_string(),
            timeout_secs: 30,
        }
    }
}

impl HttpSheetClientConfig {
    pub fn new(sheet_id: impl Into<String>, gid: impl Into<String>) -> Self {
        Self {
            sheet_id: sheet_id.into(),
            gid: gid.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// CSV 导出 URL
    pub fn export_url(&self) -> String {
        format!(
            "{}/spreadsheets/d/{}/export?format=csv&gid={}",
            self.base_url.trim_end_matches('/'),
            self.sheet_id,
            self.gid
        )
    }

    /// 表格编辑页 URL（写入生成文件头部）
    pub fn edit_url(&self) -> String {
        format!(
            "{}/spreadsheets/d/{}/edit?gid={}#gid={}",
            self.base_url.trim_end_matches('/'),
            self.sheet_id,
            self.gid,
            self.gid
        )
    }
}

/// HTTP 表格客户端
pub struct HttpSheetClient {
    client: Client,
    config: HttpSheetClientConfig,
}

impl HttpSheetClient {
    /// 创建新的 HTTP 表格客户端
    pub fn new(config: HttpSheetClientConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpSheetClientConfig {
        &self.config
    }
}

#[async_trait]
impl SheetSourcePort for HttpSheetClient {
    async fn fetch_rows(&self) -> Result<SheetRows, FetchError> {
        let url = self.config.export_url();
        tracing::debug!(url = %url, "Sending sheet export request");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else if e.is_connect() {
                FetchError::NetworkError(format!("Cannot connect to sheet service: {}", e))
            } else {
                FetchError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if is_html_content_type(&content_type) {
            tracing::warn!(content_type = %content_type, "Sheet export returned a web page");
            return Err(FetchError::NotCsv(format!("a web page ({})", content_type)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::NetworkError(format!("Failed to read body: {}", e)))?;

        let rows = parse_csv(&text)?;
        tracing::info!(
            rows = rows.len(),
            bytes = text.len(),
            "Sheet export downloaded"
        );
        Ok(rows)
    }

    fn describe(&self) -> String {
        self.config.edit_url()
    }
}

fn is_html_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|mime| mime.trim().eq_ignore_ascii_case("text/html"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpSheetClientConfig::default();
        assert_eq!(config.base_url, "https://docs.google.com");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_export_url() {
        let config = HttpSheetClientConfig::new("abc123", "42");
        assert_eq!(
            config.export_url(),
            "https://docs.google.com/spreadsheets/d/abc123/export?format=csv&gid=42"
        );
        assert_eq!(
            config.edit_url(),
            "https://docs.google.com/spreadsheets/d/abc123/edit?gid=42#gid=42"
        );
    }

    #[test]
    fn test_html_content_type_detection() {
        assert!(is_html_content_type("text/html; charset=utf-8"));
        assert!(is_html_content_type("Text/HTML"));
        assert!(!is_html_content_type("text/csv; charset=utf-8"));
        assert!(!is_html_content_type(""));
    }

    #[test]
    fn test_config_builder() {
        let config = HttpSheetClientConfig::new("id", "1")
            .with_base_url("http://localhost:9000/")
            .with_timeout(5);
        assert_eq!(
            config.export_url(),
            "http://localhost:9000/spreadsheets/d/id/export?format=csv&gid=1"
        );
        assert_eq!(config.timeout_secs, 5);
    }
}
