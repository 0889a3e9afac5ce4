//! Catalog of stored files and their metadata.
//!
//! Simple JSON-based index, one item per stored archive or attachment.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content::{ContentId, StoredKind};

/// Catalog of all stored content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog format version
    pub version: u32,

    /// All cataloged items
    pub items: Vec<CatalogItem>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            version: 1,
            items: Vec::new(),
        }
    }

    /// Load the catalog from disk (empty if the file does not exist yet)
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog JSON: {}", path.display()))
    }

    /// Save the catalog to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write catalog: {}", path.display()))?;

        Ok(())
    }

    /// Add an item, replacing any existing item with the same ID.
    ///
    /// Metadata of the replaced item is carried over unless the new item
    /// sets the same key.
    pub fn add(&mut self, mut item: CatalogItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            for (key, value) in std::mem::take(&mut existing.meta) {
                item.meta.entry(key).or_insert(value);
            }
            *existing = item;
        } else {
            self.items.push(item);
        }
    }

    /// Get an item by ID
    pub fn get(&self, id: &ContentId) -> Option<&CatalogItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Get a mutable item by ID
    pub fn get_mut(&mut self, id: &ContentId) -> Option<&mut CatalogItem> {
        self.items.iter_mut().find(|i| &i.id == id)
    }

    /// Find the item stored from a given source URL or path
    pub fn find_by_source(&self, source: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.source == source)
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A single item in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique content identifier (SHA256(source)[0:16])
    pub id: ContentId,

    /// Source URL (archives) or original path (attachments)
    pub source: String,

    /// What was stored
    pub kind: StoredKind,

    /// Where the stored copy lives
    pub stored_path: PathBuf,

    /// When the file was stored
    pub stored_at: DateTime<Utc>,

    /// Free-form string metadata
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
}

impl CatalogItem {
    /// Create a new catalog item; the ID is derived from the source
    pub fn new(
        source: impl Into<String>,
        kind: StoredKind,
        stored_path: impl Into<PathBuf>,
    ) -> Self {
        let source = source.into();
        let id = ContentId::from_url(&source);

        Self {
            id,
            source,
            kind,
            stored_path: stored_path.into(),
            stored_at: Utc::now(),
            meta: BTreeMap::new(),
        }
    }
}
