//! Content importer: fetch -> extract -> walk.
//!
//! A fresh import downloads the archive, unpacks it under the uploads
//! directory and walks the requested plot. The extraction directory and
//! archive path are stored as metadata on the downloaded archive so a later
//! run can re-walk the same files without downloading again.

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use crate::adapters::{ContentStore, Extractor};
use crate::domain::{ContentTree, TreeStats};
use crate::library::ContentId;

use super::error::ImportError;
use super::walker::Walker;

/// Metadata key for the downloaded archive path
pub const META_ZIP_FPATH: &str = "zip_fpath";

/// Metadata key for the extracted content directory
pub const META_CONTENT_DIR: &str = "import_content_files_dir";

/// Where to fetch from and where to unpack to
#[derive(Debug, Clone)]
pub struct ImportSettings {
    /// Content archive URL
    pub archive_url: String,

    /// Directory the archive is extracted into
    pub uploads_dir: PathBuf,

    /// Top-level directory name the archive unpacks to
    pub extract_dir: String,
}

impl ImportSettings {
    /// Where the archive's top-level directory lands
    pub fn extracted_path(&self) -> PathBuf {
        self.uploads_dir.join(&self.extract_dir)
    }
}

/// Imports content plots through a store and an extractor
pub struct Importer<S, E> {
    store: S,
    extractor: E,
    settings: ImportSettings,

    /// Identifier of the downloaded archive
    archive_id: Option<ContentId>,

    /// Local path of the downloaded archive
    zip_fpath: Option<PathBuf>,

    /// Directory the archive was extracted to
    content_dir: Option<PathBuf>,

    /// Everything parsed so far
    content: ContentTree,
}

impl<S: ContentStore, E: Extractor> Importer<S, E> {
    pub fn new(store: S, extractor: E, settings: ImportSettings) -> Self {
        Self {
            store,
            extractor,
            settings,
            archive_id: None,
            zip_fpath: None,
            content_dir: None,
            content: ContentTree::new(),
        }
    }

    /// Download, extract and parse one plot
    #[instrument(skip(self))]
    pub async fn import(&mut self, plot_name: &str) -> Result<&ContentTree, ImportError> {
        self.download().await?;
        self.extract()?;
        self.parse(plot_name)
    }

    /// Download the archive into the store
    #[instrument(skip(self), fields(url = %self.settings.archive_url))]
    pub async fn download(&mut self) -> Result<(), ImportError> {
        let url = self.settings.archive_url.clone();

        let id = self
            .store
            .fetch(&url)
            .await
            .map_err(|source| ImportError::Fetch {
                url: url.clone(),
                source,
            })?;

        self.zip_fpath = self.store.resolve_path(&id);
        info!(%id, zip = ?self.zip_fpath, "Archive downloaded");
        self.archive_id = Some(id);

        Ok(())
    }

    /// Unpack the downloaded archive, replacing any earlier extraction
    #[instrument(skip(self))]
    pub fn extract(&mut self) -> Result<(), ImportError> {
        let Some(zip) = self.zip_fpath.clone() else {
            return Err(ImportError::extraction(
                self.settings.extracted_path(),
                format!("No zip file downloaded from {}", self.settings.archive_url),
            ));
        };

        if !zip.is_file() {
            return Err(ImportError::extraction(&zip, "Zip file not found"));
        }

        let uploads = &self.settings.uploads_dir;
        let unzipped = self.settings.extracted_path();

        if unzipped.is_dir() {
            if let Err(e) = std::fs::remove_dir_all(&unzipped) {
                self.content_dir = None;
                return Err(ImportError::extraction(
                    &zip,
                    format!("Failed to remove {}: {}", unzipped.display(), e),
                ));
            }
        }

        if let Err(e) = self.extractor.extract(&zip, uploads) {
            self.content_dir = None;
            return Err(ImportError::extraction(
                &zip,
                format!("Unzip to {} failed: {:#}", uploads.display(), e),
            ));
        }

        info!(dir = %unzipped.display(), "Archive extracted");
        self.content_dir = Some(unzipped.clone());

        if let Some(id) = &self.archive_id {
            self.store
                .set_meta(id, META_ZIP_FPATH, &zip.to_string_lossy())
                .map_err(ImportError::Store)?;
            self.store
                .set_meta(id, META_CONTENT_DIR, &unzipped.to_string_lossy())
                .map_err(ImportError::Store)?;
        }

        Ok(())
    }

    /// Walk one plot of the extracted content
    #[instrument(skip(self))]
    pub fn parse(&mut self, plot_name: &str) -> Result<&ContentTree, ImportError> {
        let content_dir = self.content_dir.clone().ok_or_else(|| {
            ImportError::not_found("Extracted content dir", self.settings.extracted_path())
        })?;

        if !content_dir.is_dir() {
            return Err(ImportError::not_found("Extracted content dir", content_dir));
        }

        let plot_dir = content_dir.join(plot_name);
        if !plot_dir.is_dir() {
            return Err(ImportError::not_found("Plot dir", plot_dir));
        }

        let tree = Walker::new(&mut self.store).scan(&plot_dir)?;

        let stats = TreeStats::collect(&tree);
        info!(
            plot = plot_name,
            pieces = stats.pieces,
            attachments = stats.attachments,
            sections = stats.dirs,
            "Plot parsed"
        );

        self.content.insert_plot(plot_name, tree);
        Ok(&self.content)
    }

    /// Re-walk content extracted by an earlier import, without fetching
    #[instrument(skip(self))]
    pub fn parse_existing(&mut self, plot_name: &str) -> Result<&ContentTree, ImportError> {
        match self.store.find_by_source(&self.settings.archive_url) {
            Some(id) => {
                self.zip_fpath = self
                    .store
                    .get_meta(&id, META_ZIP_FPATH)
                    .map(PathBuf::from);
                self.content_dir = self
                    .store
                    .get_meta(&id, META_CONTENT_DIR)
                    .map(PathBuf::from);
                self.archive_id = Some(id);
            }
            None => warn!(url = %self.settings.archive_url, "No earlier download recorded"),
        }

        self.parse(plot_name)
    }

    /// Everything parsed so far
    pub fn content(&self) -> &ContentTree {
        &self.content
    }

    pub fn content_dir(&self) -> Option<&PathBuf> {
        self.content_dir.as_ref()
    }

    pub fn zip_fpath(&self) -> Option<&PathBuf> {
        self.zip_fpath.as_ref()
    }

    pub fn archive_id(&self) -> Option<&ContentId> {
        self.archive_id.as_ref()
    }
}
