//! Client for the scrape service.

use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::{Error, Result};
use crate::types::{Document, ScrapeRequest, ScrapeResponse};
use crate::version::build_user_agent;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use std::time::Duration;
use tracing::{debug, warn};

const SCRAPE_PATH: &str = "/v2/scrape";

/// Builder for constructing a [`Client`].
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent_suffix: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent_suffix: None,
        }
    }

    /// Set the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent suffix.
    pub fn user_agent_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        if self.api_key.is_empty() {
            return Err(Error::Config("API key is required".into()));
        }

        if !self.base_url.starts_with("https://") {
            warn!(
                base_url = %self.base_url,
                "API base URL is not using HTTPS. This is insecure."
            );
        }

        let user_agent = build_user_agent(self.user_agent_suffix.as_deref());

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| Error::Config("API key contains invalid header characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent)
                .map_err(|_| Error::Config("User-Agent suffix contains invalid characters".into()))?,
        );

        let http_client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(Error::Http)?;

        Ok(Client {
            base_url: self.base_url,
            http_client,
        })
    }
}

/// Handle bound to one API key.
///
/// # Example
///
/// ```rust,no_run
/// use product_scraper::{Client, Format, ScrapeRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), product_scraper::Error> {
///     let client = Client::builder("fc-your-key").build()?;
///
///     let doc = client
///         .scrape(ScrapeRequest::new("https://example.com").format(Format::Markdown))
///         .await?;
///
///     println!("{:?}", doc.markdown);
///     Ok(())
/// }
/// ```
pub struct Client {
    base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new client builder.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        ClientBuilder::new(config.api_key.clone())
            .base_url(config.base_url.clone())
            .timeout(config.timeout)
            .build()
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Scrape a single page.
    ///
    /// Makes exactly one request. A successful envelope without a document
    /// yields an empty [`Document`].
    pub async fn scrape(&self, request: ScrapeRequest) -> Result<Document> {
        let url = format!("{}{}", self.base_url, SCRAPE_PATH);
        debug!(target_url = %request.url, formats = request.formats.len(), "Scraping page");

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(Error::from_response(response).await);
        }

        let envelope: ScrapeResponse = response.json().await.map_err(map_transport_error)?;

        if !envelope.success {
            return Err(Error::Scrape(
                envelope.error.unwrap_or_else(|| "Unknown error".into()),
            ));
        }

        if let Some(warning) = envelope.warning.as_deref() {
            warn!(target_url = %request.url, warning, "Scrape completed with a warning");
        }

        Ok(envelope.data.unwrap_or_default())
    }
}

fn map_transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::Http(e)
    }
}
