//! Nested content tree produced by the directory walker.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::library::ContentId;

use super::piece::Piece;

/// One directory level: entry key -> entry
pub type DirTree = BTreeMap<String, FileEntry>;

/// An entry in a directory level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileEntry {
    /// A file (markup, image or anything else)
    File(FileLeaf),

    /// A subdirectory
    Dir(DirTree),
}

impl FileEntry {
    /// The leaf record, if this entry is a file
    pub fn as_file(&self) -> Option<&FileLeaf> {
        match self {
            FileEntry::File(leaf) => Some(leaf),
            FileEntry::Dir(_) => None,
        }
    }

    /// The nested level, if this entry is a directory
    pub fn as_dir(&self) -> Option<&DirTree> {
        match self {
            FileEntry::Dir(dir) => Some(dir),
            FileEntry::File(_) => None,
        }
    }
}

/// Leaf record describing one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileLeaf {
    /// Absolute path of the file
    pub file: PathBuf,

    /// Parsed piece (markup files only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece: Option<Piece>,

    /// Media store identifier (registered images only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<ContentId>,
}

impl FileLeaf {
    /// A bare leaf with no piece or attachment
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            piece: None,
            attachment_id: None,
        }
    }

    pub fn with_piece(mut self, piece: Piece) -> Self {
        self.piece = Some(piece);
        self
    }

    pub fn with_attachment(mut self, id: ContentId) -> Self {
        self.attachment_id = Some(id);
        self
    }
}

/// All imported plots: plot name -> root level of that plot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentTree {
    plots: BTreeMap<String, DirTree>,
}

impl ContentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole subtree of a plot
    pub fn insert_plot(&mut self, plot_name: impl Into<String>, tree: DirTree) {
        self.plots.insert(plot_name.into(), tree);
    }

    /// Root level of a plot
    pub fn plot(&self, plot_name: &str) -> Option<&DirTree> {
        self.plots.get(plot_name)
    }

    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }
}

/// Counts of the leaves in a level, recursively
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub dirs: usize,
    pub pieces: usize,
    pub attachments: usize,
    pub other_files: usize,
}

impl TreeStats {
    pub fn collect(tree: &DirTree) -> Self {
        let mut stats = Self::default();
        stats.add(tree);
        stats
    }

    fn add(&mut self, tree: &DirTree) {
        for entry in tree.values() {
            match entry {
                FileEntry::Dir(dir) => {
                    self.dirs += 1;
                    self.add(dir);
                }
                FileEntry::File(leaf) if leaf.piece.is_some() => self.pieces += 1,
                FileEntry::File(leaf) if leaf.attachment_id.is_some() => self.attachments += 1,
                FileEntry::File(_) => self.other_files += 1,
            }
        }
    }
}
