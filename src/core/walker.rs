//! Recursive scan of an extracted plot directory.
//!
//! Each directory level becomes a `DirTree`:
//! - subdirectories recurse, their name becoming the section of what they hold
//! - `*.md` files are parsed into pieces, keyed by name without `.md`
//! - `svg|jpg|jpeg|png` files are registered as attachments, keyed by full name
//! - anything else is a bare leaf

use std::path::Path;

use tracing::{debug, warn};

use crate::adapters::MediaStore;
use crate::domain::{DirTree, FileEntry, FileLeaf, Piece};

use super::error::ImportError;
use super::frontmatter;

/// Entries never included in the tree
const SKIPPED: [&str; 3] = [".", "..", "README.md"];

/// Markup file suffix
const MARKUP_SUFFIX: &str = ".md";

/// Extensions registered with the media store
const IMAGE_EXTENSIONS: [&str; 4] = ["svg", "jpg", "jpeg", "png"];

/// Tree key for a file name: a trailing `.md` is stripped, nothing else
pub fn piece_key(file_name: &str) -> &str {
    file_name.strip_suffix(MARKUP_SUFFIX).unwrap_or(file_name)
}

fn is_image(file_name: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| {
        file_name
            .strip_suffix(ext)
            .is_some_and(|rest| rest.ends_with('.'))
    })
}

/// Walks a content directory, registering images as it goes
pub struct Walker<'a> {
    media: &'a mut dyn MediaStore,
}

impl<'a> Walker<'a> {
    pub fn new(media: &'a mut dyn MediaStore) -> Self {
        Self { media }
    }

    /// Scan `dir` as the root of a walk.
    ///
    /// Fails only when `dir` itself cannot be listed.
    pub fn scan(&mut self, dir: &Path) -> Result<DirTree, ImportError> {
        if !dir.is_dir() {
            return Err(ImportError::not_found("Content dir", dir));
        }

        let names = list_dir(dir).map_err(|_| ImportError::not_found("Content dir", dir))?;
        Ok(self.scan_entries(dir, &names, ""))
    }

    fn scan_level(&mut self, dir: &Path, section: &str) -> DirTree {
        match list_dir(dir) {
            Ok(names) => self.scan_entries(dir, &names, section),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
                DirTree::new()
            }
        }
    }

    fn scan_entries(&mut self, dir: &Path, names: &[String], section: &str) -> DirTree {
        let mut level = DirTree::new();

        for name in names {
            if SKIPPED.contains(&name.as_str()) {
                continue;
            }

            let path = dir.join(name);

            if path.is_dir() {
                let nested = self.scan_level(&path, name);
                level.insert(name.clone(), FileEntry::Dir(nested));
                continue;
            }

            let key = piece_key(name);
            let mut leaf = FileLeaf::new(&path);

            if name.ends_with(MARKUP_SUFFIX) {
                match frontmatter::parse_file(&path) {
                    Ok(fields) => leaf = leaf.with_piece(Piece::from_fields(&fields, key, section)),
                    Err(e) => {
                        warn!(file = %path.display(), error = %e, "Skipping unreadable piece")
                    }
                }
            } else if is_image(name) {
                match self.media.register_image(&path) {
                    Ok(id) => leaf = leaf.with_attachment(id),
                    Err(source) => {
                        let err = ImportError::MediaRegistration {
                            path: path.clone(),
                            source,
                        };
                        warn!(error = %err, "Image left without attachment");
                    }
                }
            }

            debug!(key, section, file = %path.display(), "Scanned");
            level.insert(key.to_string(), FileEntry::File(leaf));
        }

        level
    }
}

/// Entry names of a directory in sorted order
fn list_dir(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}
