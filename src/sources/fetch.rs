//! Fetch transcript bytes for a replay URL.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not access {url}: status {status}")]
    Status { url: String, status: u16 },
    /// The replay host answers 200 with a "Could not connect" page when the
    /// log is missing from its database.
    #[error("replay server unavailable for {url}")]
    Unavailable { url: String },
}

/// Download one page body, treating any non-200 status as an error.
pub fn fetch_page(url: &str) -> Result<String, FetchError> {
    let response = reqwest::blocking::get(url).map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })?;
    let status = response.status().as_u16();
    if status != 200 {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }
    response.text().map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })
}

/// Download one replay transcript, rejecting the host's placeholder page for
/// missing logs.
pub fn fetch_transcript(url: &str) -> Result<String, FetchError> {
    let body = fetch_page(url)?;
    if body.contains("Could not connect") {
        return Err(FetchError::Unavailable {
            url: url.to_string(),
        });
    }
    Ok(body)
}
