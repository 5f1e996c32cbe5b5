//! Wire types for the scrape endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request for scraping a single page.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    /// URL to scrape. Forwarded as-is; the service does any validation.
    pub url: String,
    /// Output formats to produce.
    pub formats: Vec<Format>,
    /// Strip navigation, headers and footers before extraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_main_content: Option<bool>,
    /// Milliseconds to wait for the page to settle before scraping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<u64>,
    /// Service-side timeout in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Accept a cached page younger than this many milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u64>,
    /// Emulate a mobile device.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<bool>,
}

impl ScrapeRequest {
    /// Create a request for `url` with no formats.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Add an output format.
    pub fn format(mut self, format: Format) -> Self {
        self.formats.push(format);
        self
    }
}

/// Output format requested from the service.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Format {
    /// Page content as markdown.
    Markdown,
    /// Cleaned HTML.
    Html,
    /// Unmodified HTML.
    RawHtml,
    /// Links found on the page.
    Links,
    /// Structured extraction guided by a JSON Schema and a prompt.
    Json {
        /// JSON Schema the output must match.
        #[serde(skip_serializing_if = "Option::is_none")]
        schema: Option<Value>,
        /// Natural-language extraction instruction.
        #[serde(skip_serializing_if = "Option::is_none")]
        prompt: Option<String>,
    },
}

/// Envelope returned by the scrape endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeResponse {
    /// Whether the scrape succeeded.
    pub success: bool,
    /// Scraped document.
    pub data: Option<Document>,
    /// Error message when `success` is false.
    pub error: Option<String>,
    /// Non-fatal warning from the service.
    pub warning: Option<String>,
}

/// A scraped page.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Structured payload produced by a `json` format.
    pub json: Option<Value>,
    /// Markdown rendition.
    pub markdown: Option<String>,
    /// Cleaned HTML.
    pub html: Option<String>,
    /// Unmodified HTML.
    pub raw_html: Option<String>,
    /// Links found on the page.
    pub links: Option<Vec<String>>,
    /// Page metadata.
    pub metadata: Option<DocumentMetadata>,
}

/// Metadata about the scraped page.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Page title.
    pub title: Option<String>,
    /// Page description.
    pub description: Option<String>,
    /// URL that was requested.
    #[serde(rename = "sourceURL")]
    pub source_url: Option<String>,
    /// Final URL after redirects.
    pub url: Option<String>,
    /// HTTP status of the target page.
    pub status_code: Option<u16>,
    /// Credits charged for the scrape.
    pub credits_used: Option<u64>,
    /// Error encountered while fetching the page.
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let req = ScrapeRequest::new("https://example.com").format(Format::Json {
            schema: Some(json!({"type": "object"})),
            prompt: Some("Extract things".into()),
        });

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "url": "https://example.com",
                "formats": [{
                    "type": "json",
                    "schema": {"type": "object"},
                    "prompt": "Extract things",
                }],
            })
        );
    }

    #[test]
    fn test_optional_fields_are_camel_case() {
        let req = ScrapeRequest {
            only_main_content: Some(true),
            wait_for: Some(500),
            max_age: Some(0),
            ..ScrapeRequest::new("https://example.com").format(Format::RawHtml)
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["onlyMainContent"], json!(true));
        assert_eq!(value["waitFor"], json!(500));
        assert_eq!(value["maxAge"], json!(0));
        assert_eq!(value["formats"], json!([{"type": "rawHtml"}]));
        assert!(value.get("mobile").is_none());
    }

    #[test]
    fn test_response_deserialization() {
        let resp: ScrapeResponse = serde_json::from_value(json!({
            "success": true,
            "data": {
                "json": {"name": "Widget"},
                "metadata": {
                    "title": "Widget page",
                    "sourceURL": "https://example.com/w",
                    "statusCode": 200,
                    "creditsUsed": 5,
                },
            },
        }))
        .unwrap();

        let doc = resp.data.unwrap();
        assert_eq!(doc.json, Some(json!({"name": "Widget"})));
        let meta = doc.metadata.unwrap();
        assert_eq!(meta.source_url.as_deref(), Some("https://example.com/w"));
        assert_eq!(meta.status_code, Some(200));
        assert_eq!(meta.credits_used, Some(5));
    }

    #[test]
    fn test_failed_response() {
        let resp: ScrapeResponse =
            serde_json::from_value(json!({"success": false, "error": "blocked"})).unwrap();
        assert!(!resp.success);
        assert!(resp.data.is_none());
        assert_eq!(resp.error.as_deref(), Some("blocked"));
    }
}
