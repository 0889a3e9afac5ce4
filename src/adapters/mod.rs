//! Adapter interfaces for external collaborators.
//!
//! The importer never touches the network, archives or the attachment
//! store directly; it goes through these traits. `crate::library::Library`
//! implements the store-side traits, `ZipExtractor` the extraction one.

pub mod archive;
pub mod http;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::library::ContentId;

// Re-export the concrete adapters
pub use archive::ZipExtractor;
pub use http::HttpDownloader;

/// Downloads a file and stores it durably
#[async_trait]
pub trait Fetcher: Send {
    /// Download `url` and store it, returning its identifier
    async fn fetch(&mut self, url: &str) -> Result<ContentId>;

    /// Local path of a stored file
    fn resolve_path(&self, id: &ContentId) -> Option<PathBuf>;

    /// Identifier of a file previously fetched from `url`
    fn find_by_source(&self, url: &str) -> Option<ContentId>;
}

/// Unpacks an archive into a directory
pub trait Extractor: Send + Sync {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<()>;
}

/// Registers image files as attachments
pub trait MediaStore {
    fn register_image(&mut self, path: &Path) -> Result<ContentId>;
}

/// String metadata keyed by stored-content identifier
pub trait MetaStore {
    fn get_meta(&self, id: &ContentId, key: &str) -> Option<String>;

    fn set_meta(&mut self, id: &ContentId, key: &str, value: &str) -> Result<()>;
}

/// Everything the importer needs from the storage side
pub trait ContentStore: Fetcher + MediaStore + MetaStore {}

impl<T: Fetcher + MediaStore + MetaStore> ContentStore for T {}

/// How collaborators write into their target locations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FsMethod {
    /// Write straight into the target path
    #[default]
    Direct,

    /// Write next to the target, then rename into place
    Staged,
}

impl FsMethod {
    /// Write `bytes` to `path`, creating the parent directory
    pub fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let parent = path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

        match self {
            FsMethod::Direct => std::fs::write(path, bytes)
                .with_context(|| format!("Failed to write file: {}", path.display())),
            FsMethod::Staged => {
                let mut staged = tempfile::NamedTempFile::new_in(parent).with_context(|| {
                    format!("Failed to create staging file in {}", parent.display())
                })?;
                staged.write_all(bytes).with_context(|| {
                    format!("Failed to write staging file for {}", path.display())
                })?;
                staged
                    .persist(path)
                    .with_context(|| format!("Failed to move staged file to {}", path.display()))?;
                Ok(())
            }
        }
    }
}

impl std::fmt::Display for FsMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsMethod::Direct => write!(f, "direct"),
            FsMethod::Staged => write!(f, "staged"),
        }
    }
}

impl std::str::FromStr for FsMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(FsMethod::Direct),
            "staged" => Ok(FsMethod::Staged),
            _ => anyhow::bail!("Unknown filesystem method: {}", s),
        }
    }
}
