//! Schema-guided product data extraction through the Firecrawl scrape API.
//!
//! Page fetching, rendering and LLM-based field extraction all happen on the
//! service side. This crate describes the fields to extract, makes the call,
//! and stamps the returned record with its collection time.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use product_scraper::{scrape_product, Client, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), product_scraper::Error> {
//!     let config = Config::from_env()?;
//!     let client = Client::from_config(&config)?;
//!
//!     let record = scrape_product(&client, "https://example.com/product").await?;
//!
//!     println!("{}", serde_json::to_string_pretty(&record)?);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod product;
mod schema;
mod types;
mod version;

pub use client::{Client, ClientBuilder};
pub use config::{Config, API_KEY_VAR, API_URL_VAR, TIMEOUT_VAR};
pub use error::{Error, Result};
pub use product::{
    product_request, product_schema, scrape_product, stamp_record, Product, PRODUCT_PROMPT,
    TIMESTAMP_FIELD,
};
pub use schema::{Field, FieldType, Schema};
pub use types::*;
pub use version::VERSION;
