//! Product extraction and result shaping.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::schema::{FieldType, Schema};
use crate::types::{Format, ScrapeRequest};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Instruction sent alongside the product schema.
pub const PRODUCT_PROMPT: &str =
    "Extract product information including name, price, currency, and main image URL";

/// Key the collection time is stored under.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// A product as described to the extraction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// The URL of the product.
    pub url: String,
    /// The product name/title.
    pub name: String,
    /// The current price of the product.
    pub price: f64,
    /// Currency code (USD, EUR, etc).
    pub currency: String,
    /// The URL of the main image of the product.
    pub main_image_url: String,
}

impl Product {
    /// Parse a typed product out of a scraped record.
    ///
    /// Keys other than the declared fields, including the timestamp, are ignored.
    pub fn from_record(record: &Map<String, Value>) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(record.clone()))?)
    }
}

/// Field descriptor for [`Product`].
pub fn product_schema() -> Schema {
    Schema::new()
        .field("url", FieldType::String, "The URL of the product")
        .field("name", FieldType::String, "The product name/title")
        .field(
            "price",
            FieldType::Number,
            "The current price of the product",
        )
        .field("currency", FieldType::String, "Currency code (USD, EUR, etc)")
        .field(
            "main_image_url",
            FieldType::String,
            "The URL of the main image of the product",
        )
}

/// Scrape request asking for schema-guided product extraction of `url`.
pub fn product_request(url: impl Into<String>) -> ScrapeRequest {
    ScrapeRequest::new(url).format(Format::Json {
        schema: Some(product_schema().to_json_schema()),
        prompt: Some(PRODUCT_PROMPT.to_string()),
    })
}

/// Fetch structured product data for one URL, stamped with the collection time.
///
/// The URL is not validated locally. If the service returns no structured
/// payload the record holds only the timestamp.
pub async fn scrape_product(client: &Client, url: &str) -> Result<Map<String, Value>> {
    let document = client.scrape(product_request(url)).await?;
    let record = stamp_record(document.json, Utc::now())?;
    tracing::info!(url, fields = record.len() - 1, "Scraped product");
    Ok(record)
}

/// Turn an extracted payload into a record carrying a UTC timestamp.
///
/// A missing or null payload becomes an empty record. Any existing
/// `timestamp` key is overwritten.
pub fn stamp_record(payload: Option<Value>, at: DateTime<Utc>) -> Result<Map<String, Value>> {
    let mut record = match payload {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(other) => return Err(Error::UnexpectedPayload(json_kind(&other))),
    };

    record.insert(
        TIMESTAMP_FIELD.to_string(),
        Value::String(at.to_rfc3339_opts(SecondsFormat::Micros, true)),
    );
    Ok(record)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
