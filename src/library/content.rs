//! Stored content identifiers and kinds.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content identifier (SHA256(source)[0:16])
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Create a content ID from a source URL
    pub fn from_url(url: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let result = hasher.finalize();

        // Take first 8 bytes (16 hex chars)
        Self(hex::encode(&result[..8]))
    }

    /// Create a content ID from a local file path
    pub fn from_path(path: &Path) -> Self {
        Self::from_url(&path.to_string_lossy())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of stored item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoredKind {
    /// Downloaded content archive
    Archive,

    /// Registered media file (image)
    Attachment,
}

/// File name to store a download under: last URL path segment, or `download`
pub fn file_name_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let path = path.split_once("://").map_or(path, |(_, rest)| rest);

    path.split_once('/')
        .and_then(|(_host, rest)| rest.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .unwrap_or("download")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_content_id_from_url() {
        let url = "https://github.com/Teplitsa/kandinsky-text/archive/master.zip";
        let id1 = ContentId::from_url(url);
        let id2 = ContentId::from_url(url);
        let id3 = ContentId::from_url("https://example.com/other.zip");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1.as_str().len(), 16); // 8 bytes = 16 hex chars
    }

    #[test]
    fn test_content_id_from_path_is_stable() {
        let path = PathBuf::from("/uploads/kandinsky-text-master/color-line/img/a.jpg");
        assert_eq!(ContentId::from_path(&path), ContentId::from_path(&path));
    }

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(
            file_name_from_url("https://github.com/Teplitsa/kandinsky-text/archive/master.zip"),
            "master.zip"
        );
        assert_eq!(file_name_from_url("https://example.com/a/b.zip?x=1#frag"), "b.zip");
        assert_eq!(file_name_from_url("https://example.com/"), "download");
        assert_eq!(file_name_from_url("https://example.com"), "download");
    }
}
