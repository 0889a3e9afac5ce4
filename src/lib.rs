//! plotseed - Demo content importer
//!
//! Fetches a content archive, extracts it and parses a plot directory of
//! `+++` front-matter files into a nested tree of pieces and attachments
//! for a site setup wizard.
//!
//! # Modules
//!
//! - `adapters`: Collaborator traits (fetch, extract, media, metadata) and
//!   the HTTP/ZIP implementations
//! - `core`: Front-matter parser, directory walker, importer, lookup facade
//! - `domain`: Data structures (Piece, ContentTree)
//! - `library`: Local file store and catalog
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Download and parse a plot
//! plotseed import problem-org
//!
//! # Re-parse what was downloaded last time
//! plotseed reparse color-line --json
//!
//! # Look at one piece
//! plotseed show color-line intro --section news --field title
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use adapters::{ContentStore, Extractor, Fetcher, FsMethod, MediaStore, MetaStore, ZipExtractor};
pub use core::{ImportError, ImportSettings, Importer, PlotContent};
pub use domain::{ContentTree, DirTree, FileEntry, FileLeaf, Piece, PieceField, PieceValue};
pub use library::{Catalog, CatalogItem, ContentId, Library, StoredKind};
