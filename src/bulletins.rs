//! Weather bulletin lookup: finds the PDF links on the configured bulletin page.

use std::collections::HashSet;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, Url};
use tracing::{debug, info, instrument, warn};

use crate::app_system::{PortalError, Result};

static PDF_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<a\s[^>]*?href\s*=\s*["']([^"']+?\.pdf)["']"#).expect("valid PDF link pattern")
});

pub struct BulletinScraper {
    client: Client,
    page_url: Option<Url>,
}

impl BulletinScraper {
    pub fn new(page_url: Option<&str>, timeout: Duration) -> Result<Self> {
        let page_url = page_url
            .map(Url::parse)
            .transpose()
            .map_err(|e| PortalError::Config(format!("Invalid WEATHER_BULLETIN_URL: {}", e)))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PortalError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, page_url })
    }

    /// One GET, no retry. Any failure yields an empty list.
    #[instrument(skip(self))]
    pub async fn fetch_pdf_links(&self) -> Vec<String> {
        let Some(url) = &self.page_url else {
            debug!("No bulletin page configured");
            return Vec::new();
        };

        match self.fetch_page(url).await {
            Ok(html) => {
                let links = extract_pdf_links(&html, url);
                info!(links = links.len(), "Bulletin links found");
                links
            }
            Err(e) => {
                warn!(error = %e, url = %url, "Bulletin page fetch failed");
                Vec::new()
            }
        }
    }

    async fn fetch_page(&self, url: &Url) -> std::result::Result<String, reqwest::Error> {
        self.client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

/// Absolute URLs of every `<a href="...pdf">` in `html`, first occurrence order, no repeats.
pub fn extract_pdf_links(html: &str, base: &Url) -> Vec<String> {
    let mut seen = HashSet::new();
    PDF_LINK_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .filter_map(|href| base.join(href.as_str().trim()).ok())
        .map(|url| url.to_string())
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://meteo.example/agromet/bulletins/").unwrap()
    }

    #[test]
    fn test_extracts_and_resolves_pdf_links() {
        let html = r#"
            <ul>
              <li><a href="week-32.pdf">Week 32</a></li>
              <li><a class="doc" HREF='/files/Seasonal-Outlook.PDF'>Outlook</a></li>
              <li><a href="https://cdn.example/dekad-2.pdf" target="_blank">Dekad</a></li>
              <li><a href="archive.html">Archive</a></li>
              <li><a href="week-32.pdf">Week 32 again</a></li>
            </ul>
        "#;

        let links = extract_pdf_links(html, &base());
        assert_eq!(
            links,
            vec![
                "https://meteo.example/agromet/bulletins/week-32.pdf",
                "https://meteo.example/files/Seasonal-Outlook.PDF",
                "https://cdn.example/dekad-2.pdf",
            ]
        );
    }

    #[test]
    fn test_page_without_pdfs_yields_nothing() {
        let html = r#"<p>No bulletin this week.</p><a href="/contact">Contact</a>"#;
        assert!(extract_pdf_links(html, &base()).is_empty());
    }

    #[test]
    fn test_invalid_page_url_is_config_error() {
        let err = BulletinScraper::new(Some("not a url"), Duration::from_secs(1)).err();
        assert!(matches!(err, Some(PortalError::Config(_))));
    }

    #[tokio::test]
    async fn test_unconfigured_scraper_returns_empty() {
        let scraper = BulletinScraper::new(None, Duration::from_secs(1)).unwrap();
        assert!(scraper.fetch_pdf_links().await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_page_returns_empty() {
        let scraper = BulletinScraper::new(Some("http://127.0.0.1:1/bulletins/"), Duration::from_secs(2)).unwrap();
        assert!(scraper.fetch_pdf_links().await.is_empty());
    }
}
