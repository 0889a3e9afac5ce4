//! Local store for downloaded archives and registered attachments.
//!
//! # Storage Layout
//!
//! ```text
//! ~/.plotseed/
//! ├── catalog.json              # Index of all stored files + metadata
//! └── library/
//!     └── <content_id>/         # SHA256(source)[0:16]
//!         └── <file name>       # master.zip, picture.jpg, ...
//! ```

pub mod catalog;
pub mod content;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::adapters::{Fetcher, FsMethod, HttpDownloader, MediaStore, MetaStore};

pub use catalog::{Catalog, CatalogItem};
pub use content::{file_name_from_url, ContentId, StoredKind};

/// File store backed by a directory and a JSON catalog
pub struct Library {
    /// Directory holding one subdirectory per stored item
    root: PathBuf,

    /// Where the catalog is persisted
    catalog_path: PathBuf,

    catalog: Catalog,

    downloader: HttpDownloader,
}

impl Library {
    /// Open the store, loading the catalog if it exists
    pub fn open(
        root: impl Into<PathBuf>,
        catalog_path: impl Into<PathBuf>,
        fs_method: FsMethod,
    ) -> Result<Self> {
        let root = root.into();
        let catalog_path = catalog_path.into();
        let catalog = Catalog::load(&catalog_path)?;

        debug!(
            root = %root.display(),
            items = catalog.len(),
            "Opened library"
        );

        Ok(Self {
            root,
            catalog_path,
            catalog,
            downloader: HttpDownloader::new(fs_method),
        })
    }

    /// Open the store at the configured locations
    pub fn from_config(config: &crate::config::ResolvedConfig) -> Result<Self> {
        Self::open(
            crate::config::paths::library_dir(&config.home),
            crate::config::paths::catalog_path(&config.home),
            config.fs_method,
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Directory for a stored item
    fn item_dir(&self, id: &ContentId) -> PathBuf {
        self.root.join(id.as_str())
    }

    /// Record an item and write the catalog through to disk
    fn record(&mut self, item: CatalogItem) -> Result<()> {
        self.catalog.add(item);
        self.catalog.save(&self.catalog_path)
    }
}

#[async_trait]
impl Fetcher for Library {
    async fn fetch(&mut self, url: &str) -> Result<ContentId> {
        let id = ContentId::from_url(url);
        let dest = self.item_dir(&id).join(file_name_from_url(url));

        let size = self.downloader.download(url, &dest).await?;
        self.record(CatalogItem::new(url, StoredKind::Archive, &dest))?;

        info!(%id, size, path = %dest.display(), "Stored download");
        Ok(id)
    }

    fn resolve_path(&self, id: &ContentId) -> Option<PathBuf> {
        self.catalog.get(id).map(|item| item.stored_path.clone())
    }

    fn find_by_source(&self, url: &str) -> Option<ContentId> {
        self.catalog.find_by_source(url).map(|item| item.id.clone())
    }
}

impl MediaStore for Library {
    /// Register an image; a path registered before keeps its identifier
    fn register_image(&mut self, path: &Path) -> Result<ContentId> {
        let source = path.to_string_lossy().into_owned();

        if let Some(existing) = self.catalog.find_by_source(&source) {
            if existing.kind == StoredKind::Attachment && existing.stored_path.is_file() {
                debug!(id = %existing.id, path = %path.display(), "Image already registered");
                return Ok(existing.id.clone());
            }
        }

        let file_name = path
            .file_name()
            .with_context(|| format!("Not a file path: {}", path.display()))?;
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read image: {}", path.display()))?;

        let item = CatalogItem::new(source, StoredKind::Attachment, PathBuf::new());
        let dest = self.item_dir(&item.id).join(file_name);
        self.downloader.fs_method().write(&dest, &bytes)?;

        let id = item.id.clone();
        self.record(CatalogItem {
            stored_path: dest,
            ..item
        })?;

        debug!(%id, path = %path.display(), "Registered image");
        Ok(id)
    }
}

impl MetaStore for Library {
    fn get_meta(&self, id: &ContentId, key: &str) -> Option<String> {
        self.catalog.get(id)?.meta.get(key).cloned()
    }

    fn set_meta(&mut self, id: &ContentId, key: &str, value: &str) -> Result<()> {
        let item = self
            .catalog
            .get_mut(id)
            .with_context(|| format!("No stored content with id {}", id))?;
        item.meta.insert(key.to_string(), value.to_string());

        self.catalog.save(&self.catalog_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open(temp: &TempDir) -> Library {
        Library::open(
            temp.path().join("library"),
            temp.path().join("catalog.json"),
            FsMethod::Direct,
        )
        .unwrap()
    }

    #[test]
    fn test_register_image_copies_and_records() {
        let temp = TempDir::new().unwrap();
        let image = temp.path().join("pic.jpg");
        std::fs::write(&image, b"jpeg bytes").unwrap();

        let mut library = open(&temp);
        let id = library.register_image(&image).unwrap();

        let stored = library.catalog().get(&id).unwrap();
        assert_eq!(stored.kind, StoredKind::Attachment);
        let expected = temp.path().join("library").join(id.as_str()).join("pic.jpg");
        assert_eq!(stored.stored_path, expected);
        assert_eq!(std::fs::read(&stored.stored_path).unwrap(), b"jpeg bytes");
    }

    #[test]
    fn test_register_image_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let image = temp.path().join("pic.png");
        std::fs::write(&image, b"png").unwrap();

        let mut library = open(&temp);
        let first = library.register_image(&image).unwrap();
        let second = library.register_image(&image).unwrap();

        assert_eq!(first, second);
        assert_eq!(library.catalog().len(), 1);
    }

    #[test]
    fn test_register_missing_image_fails() {
        let temp = TempDir::new().unwrap();
        let mut library = open(&temp);

        let err = library.register_image(&temp.path().join("nope.svg")).unwrap_err();
        assert!(err.to_string().contains("nope.svg"));
        assert!(library.catalog().is_empty());
    }

    #[test]
    fn test_meta_round_trip_persists() {
        let temp = TempDir::new().unwrap();
        let image = temp.path().join("pic.jpg");
        std::fs::write(&image, b"x").unwrap();

        let id = {
            let mut library = open(&temp);
            let id = library.register_image(&image).unwrap();
            library.set_meta(&id, "zip_fpath", "/tmp/master.zip").unwrap();
            id
        };

        let reopened = open(&temp);
        assert_eq!(reopened.get_meta(&id, "zip_fpath").as_deref(), Some("/tmp/master.zip"));
        assert_eq!(reopened.get_meta(&id, "missing"), None);
        assert_eq!(
            reopened.find_by_source(&image.to_string_lossy()),
            Some(id.clone())
        );
        assert!(reopened.resolve_path(&id).is_some());
    }

    #[test]
    fn test_set_meta_unknown_id_fails() {
        let temp = TempDir::new().unwrap();
        let mut library = open(&temp);

        let id = ContentId::from_url("https://example.com/never-fetched.zip");
        assert!(library.set_meta(&id, "key", "value").is_err());
    }
}
