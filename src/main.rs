//! Scrape one product page and print the stamped record.
//!
//! Run with: `FIRECRAWL_API_KEY=fc-... cargo run -- [URL]`

use product_scraper::{scrape_product, Client, Config};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_PRODUCT_URL: &str = "https://www.amazon.com/gp/product/B002U21ZZK/";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), product_scraper::Error> {
    init_tracing();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_PRODUCT_URL.to_string());

    let config = Config::from_env()?;
    let client = Client::from_config(&config)?;

    let record = match scrape_product(&client, &url).await {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(url = %url, error = %e, "Scrape failed");
            return Err(e);
        }
    };

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
