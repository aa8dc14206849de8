// uniwatch - platform/fetch.rs
//
// Document fetcher: one blocking HTTP GET for the published catalog.
// Any failure here is fatal to the run -- the pipeline aborts before any
// persisted state is touched, and retries are left to the next scheduled
// invocation of the whole process.

use crate::util::constants::MAX_DOCUMENT_BYTES;
use crate::util::error::FetchError;
use reqwest::blocking::Client as HttpClient;
use std::time::Duration;

/// Download the catalog document and return its raw bytes.
///
/// Fails on transport errors (DNS, TLS, connect, timeout), on any
/// non-success HTTP status, and on documents exceeding
/// [`MAX_DOCUMENT_BYTES`].
pub fn fetch_document(url: &str, timeout_secs: u64) -> Result<Vec<u8>, FetchError> {
    let client = HttpClient::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;

    tracing::info!(url, timeout_secs, "Fetching catalog document");

    let response = client.get(url).send().map_err(|e| FetchError::Transport {
        url: url.to_string(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    // Reject oversized documents up front when the server declares a length;
    // the post-download check below covers chunked responses.
    if let Some(len) = response.content_length() {
        if len > MAX_DOCUMENT_BYTES {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                size: len,
                max_size: MAX_DOCUMENT_BYTES,
            });
        }
    }

    let bytes = response.bytes().map_err(|e| FetchError::Transport {
        url: url.to_string(),
        source: e,
    })?;

    if bytes.len() as u64 > MAX_DOCUMENT_BYTES {
        return Err(FetchError::TooLarge {
            url: url.to_string(),
            size: bytes.len() as u64,
            max_size: MAX_DOCUMENT_BYTES,
        });
    }

    tracing::info!(url, size = bytes.len(), "Catalog document downloaded");
    Ok(bytes.to_vec())
}
