//! Byte fetcher with a local-cache short-circuit
//!
//! Every URL's bytes come from one of two places: a file already present
//! in the store (from a previous run) or an HTTP GET. Bodies are handled
//! as raw bytes throughout so binary assets like images survive intact.

use crate::config::CrawlerConfig;
use crate::storage::FileStore;
use crate::url::CanonicalUrl;
use crate::MirrorError;
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;

/// Where a URL's bytes came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    /// Read from an already-downloaded file
    Cache,
    /// Fetched over the network
    Network,
}

/// Bytes obtained for one URL, plus their origin
#[derive(Debug)]
pub struct Obtained {
    pub bytes: Vec<u8>,
    pub source: FetchSource,
}

/// Builds the HTTP client shared by all fetches of a run
///
/// Redirect handling stays on the library default. Timeouts come from the
/// crawler configuration so a hung server cannot stall a run forever.
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Obtains the bytes for a URL, preferring the local cache
///
/// If a file exists at `path` it is read and returned; otherwise the URL
/// is fetched with a GET. Only HTTP 200 counts as a successful fetch; any
/// other status or a transport error fails the task.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to obtain
/// * `store` - The file store backing the cache check
/// * `path` - The local path this URL maps to
pub async fn obtain(
    client: &Client,
    url: &CanonicalUrl,
    store: &FileStore,
    path: &Path,
) -> Result<Obtained, MirrorError> {
    if store.exists(path).await {
        tracing::info!("Already downloaded: {}", url);
        let bytes = store.read(path).await?;
        return Ok(Obtained {
            bytes,
            source: FetchSource::Cache,
        });
    }

    tracing::info!("Downloading: {}", url);
    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| MirrorError::FetchTransport {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(MirrorError::FetchStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| MirrorError::FetchTransport {
            url: url.to_string(),
            source: e,
        })?;

    Ok(Obtained {
        bytes: bytes.to_vec(),
        source: FetchSource::Network,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = CrawlerConfig::default();
        assert!(build_http_client(&config).is_ok());
    }

    #[tokio::test]
    async fn test_obtain_prefers_cache_over_network() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let url = CanonicalUrl::parse("http://example.invalid/cached.html").unwrap();
        let path = store.local_path(&url).unwrap();

        store.write(&path, b"cached bytes").await.unwrap();

        // example.invalid is unreachable, so this only succeeds if the
        // cache short-circuit skips the network entirely.
        let client = build_http_client(&CrawlerConfig::default()).unwrap();
        let obtained = obtain(&client, &url, &store, &path).await.unwrap();

        assert_eq!(obtained.source, FetchSource::Cache);
        assert_eq!(obtained.bytes, b"cached bytes");
    }

    // Network paths (200, non-200, transport errors) are exercised with
    // wiremock in the integration tests.
}
