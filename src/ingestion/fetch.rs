use crate::error::FetchError;

use std::time::Duration;

/// Source of raw documents for ingestion.
pub trait Fetcher: Send + Sync {
    /// Returns the raw bytes behind `locator`.
    fn fetch(&self, locator: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetches documents over HTTP(S) with a blocking client.
///
/// Timeouts are this fetcher's concern; the pipeline defines none of its own.
/// Must not be called from an async task directly; the HTTP handlers run the
/// pipelines on the blocking pool.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, locator: &str) -> Result<Vec<u8>, FetchError> {
        let url = locator.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FetchError::InvalidLocator(locator.to_string()));
        }

        tracing::info!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

/// Decodes fetched bytes as UTF-8 and lowercases the whole document.
pub fn decode_document(locator: &str, bytes: Vec<u8>) -> Result<String, FetchError> {
    let text = String::from_utf8(bytes).map_err(|source| FetchError::Decode {
        url: locator.to_string(),
        source,
    })?;
    Ok(text.to_lowercase())
}
