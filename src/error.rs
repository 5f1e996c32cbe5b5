//! Error types for product scraping.

use thiserror::Error;

/// Result type for scraper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for product scraping.
#[derive(Error, Debug)]
pub enum Error {
    /// The API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
        /// Additional detail
        detail: Option<String>,
    },

    /// Rate limit exceeded.
    #[error("Rate limited. Retry after {retry_after} seconds")]
    RateLimit {
        /// Seconds the service asked us to wait
        retry_after: u64,
        /// Error message
        message: String,
    },

    /// Request validation failed on the service side.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The account has run out of credits.
    #[error("Payment required: {0}")]
    PaymentRequired(String),

    /// Access forbidden.
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service answered 2xx but reported an unsuccessful scrape.
    #[error("Scrape failed: {0}")]
    Scrape(String),

    /// The extracted payload was not a JSON object.
    #[error("Expected an object payload, got {0}")]
    UnexpectedPayload(&'static str),

    /// Network or HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,
}

impl Error {
    /// Create an API error from a non-success response.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();

        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let body: std::result::Result<ErrorResponse, _> = response.json().await;
        let (message, detail) = match body {
            Ok(err) => (
                err.error.unwrap_or_else(|| "Unknown error".into()),
                err.details.map(|d| d.to_string()),
            ),
            Err(_) => ("Unknown error".into(), None),
        };

        match status {
            400 => Error::Validation(message),
            401 => Error::Authentication(message),
            402 => Error::PaymentRequired(message),
            403 => Error::Forbidden(message),
            404 => Error::NotFound(message),
            429 => Error::RateLimit {
                retry_after,
                message,
            },
            _ => Error::Api {
                status,
                message,
                detail,
            },
        }
    }
}

/// Error body returned by the scrape service.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    details: Option<serde_json::Value>,
}
