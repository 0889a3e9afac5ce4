//! Import errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an import (and the one that never does)
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Fetch failed for {url}: {source:#}")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Extraction failed for {}: {reason}", path.display())]
    Extraction { path: PathBuf, reason: String },

    #[error("{what} not found: {}", path.display())]
    NotFound { what: &'static str, path: PathBuf },

    /// Logged per leaf by the walker, never returned from an import
    #[error("Media registration failed for {}: {source:#}", path.display())]
    MediaRegistration {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Content store error: {0:#}")]
    Store(#[source] anyhow::Error),
}

impl ImportError {
    pub(crate) fn not_found(what: &'static str, path: impl Into<PathBuf>) -> Self {
        ImportError::NotFound {
            what,
            path: path.into(),
        }
    }

    pub(crate) fn extraction(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ImportError::Extraction {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_path() {
        let err = ImportError::not_found("Plot dir", "/uploads/master/withyou");
        assert_eq!(err.to_string(), "Plot dir not found: /uploads/master/withyou");

        let err = ImportError::extraction("/lib/master.zip", "Zip file not found");
        assert_eq!(
            err.to_string(),
            "Extraction failed for /lib/master.zip: Zip file not found"
        );

        let err = ImportError::Fetch {
            url: "https://example.com/a.zip".to_string(),
            source: anyhow::anyhow!("connection refused"),
        };
        assert!(err.to_string().contains("https://example.com/a.zip"));
        assert!(err.to_string().contains("connection refused"));
    }
}
