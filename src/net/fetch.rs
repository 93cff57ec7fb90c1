use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::settings::normalize_url;

/// Result of fetching a URL
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub html: String,
    /// Final URL after redirects
    pub url: String,
    pub status: u16,
    pub content_type: String,
}

impl FetchResult {
    /// Whether the body is a document the surface can draw.
    pub fn is_html(&self) -> bool {
        let mime = self.content_type.split(';').next().unwrap_or_default().trim();
        mime.eq_ignore_ascii_case("text/html")
            || mime.eq_ignore_ascii_case("application/xhtml+xml")
            || mime.eq_ignore_ascii_case("text/plain")
    }
}

/// Error during fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Client error: {0}")]
    Client(reqwest::Error),
    #[error("Request failed: {0}")]
    Request(reqwest::Error),
    #[error("Failed to read body: {0}")]
    Body(reqwest::Error),
}

/// Fetch a URL and return the HTML content (blocking).
pub fn fetch_url(url_str: &str) -> Result<FetchResult, FetchError> {
    let parsed = Url::parse(&normalize_url(url_str))?;

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("Mozilla/5.0 (compatible; webview-kiosk/", env!("CARGO_PKG_VERSION"), ")"))
        .timeout(Duration::from_secs(15))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(parsed.as_str())
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .map_err(FetchError::Request)?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    let final_url = response.url().to_string();

    let html = response.text().map_err(FetchError::Body)?;

    log::debug!("fetched {} ({}, {} bytes)", final_url, status, html.len());

    Ok(FetchResult {
        html,
        url: final_url,
        status,
        content_type,
    })
}
