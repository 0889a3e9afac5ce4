//! HTTP downloader for remote content archives.
//!
//! Plain blocking-style fetch: no retries, no timeouts. A hung server
//! blocks the import.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::FsMethod;

/// Downloads a URL into a local file
pub struct HttpDownloader {
    client: reqwest::Client,
    fs_method: FsMethod,
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new(FsMethod::default())
    }
}

impl HttpDownloader {
    /// Create a downloader that writes with the given method
    pub fn new(fs_method: FsMethod) -> Self {
        Self {
            client: reqwest::Client::new(),
            fs_method,
        }
    }

    /// Download `url` into `dest`, returning the number of bytes written
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        info!(url, dest = %dest.display(), "Downloading");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to request {}", url))?
            .error_for_status()
            .with_context(|| format!("Download failed: {}", url))?;

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;

        self.fs_method.write(dest, &bytes)?;
        debug!(size = bytes.len(), "Download stored");

        Ok(bytes.len() as u64)
    }

    pub fn fs_method(&self) -> FsMethod {
        self.fs_method
    }
}
