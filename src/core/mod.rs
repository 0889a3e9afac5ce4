//! Core import logic.
//!
//! This module contains:
//! - frontmatter: `+++` header/body parsing
//! - walker: Recursive scan of a plot directory
//! - importer: Fetch -> extract -> walk orchestration
//! - plot: Lookup facade over an imported plot
//! - text: Body text rendering

pub mod error;
pub mod frontmatter;
pub mod importer;
pub mod plot;
pub mod text;
pub mod walker;

// Re-export commonly used types
pub use error::ImportError;
pub use frontmatter::{parse_file, parse_post};
pub use importer::{ImportSettings, Importer, META_CONTENT_DIR, META_ZIP_FPATH};
pub use plot::{PlotContent, IMAGE_SECTION};
pub use text::render_text;
pub use walker::Walker;
