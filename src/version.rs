//! Crate version and User-Agent.

/// Current crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the User-Agent string sent with every request.
pub fn build_user_agent(suffix: Option<&str>) -> String {
    let mut ua = format!(
        "product-scraper/{} ({}; {})",
        VERSION,
        std::env::consts::OS,
        std::env::consts::ARCH
    );

    if let Some(s) = suffix {
        ua.push(' ');
        ua.push_str(s);
    }

    ua
}
