//! Fetch data over HTTP(S)
//!
//! The [`HttpReader`] fetches the raw body of a feed URL. It doesn't
//! interpret the document, that is the job of the feed adapters.

use log::{debug, error, trace};
use reqwest::Client;

/// A reader used to fetch HTTP(S) resources.
///
/// One request is sent at a time, there is no retry and no timeout
/// configuration. A failure is reported to the caller, which treats it
/// as a per-source error and moves on.
pub struct HttpReader;

impl HttpReader {
    /// Creates a new HttpReader
    pub fn new() -> Self {
        HttpReader
    }

    /// Fetches the body of the document at the given URL.
    /// A plain GET without authentication nor custom headers.
    pub async fn read_page(&self, url: &str) -> Result<String, String> {
        trace!("Running HttpReader::read_page()");
        let http_client = Client::builder()
            .build()
            .map_err(|e| format!("unable to create a HTTP client: {}", e))?;

        debug!("Sending HTTP request for URL {}", url);
        let response = http_client.get(url).send().await.map_err(|e| {
            error!("An error occured while fetching {}: {:?}", url, e);
            format!("unable to fetch the feed at {}: {}", url, e)
        })?;

        debug!(
            "Request to {} finished with status {}",
            url,
            response.status()
        );
        response.text().await.map_err(|e| {
            error!("An error occured while reading the body of {}: {:?}", url, e);
            format!("unable to read the response body from {}: {}", url, e)
        })
    }
}
