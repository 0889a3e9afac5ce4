//! Read-side facade over one imported plot.
//!
//! `PlotContent` pins a plot name, runs imports through its `Importer` and
//! answers name/section lookups. Lookups never fail: a missing plot,
//! section or item is `None`.

use std::collections::HashMap;

use crate::adapters::{ContentStore, Extractor};
use crate::domain::{ContentTree, DirTree, FileEntry, FileLeaf, Piece, PieceField, PieceValue};
use crate::library::ContentId;

use super::error::ImportError;
use super::importer::Importer;
use super::text;

/// Section images are looked up in when a piece's own section lacks them
pub const IMAGE_SECTION: &str = "img";

/// One plot's content plus lookups
pub struct PlotContent<S, E> {
    importer: Importer<S, E>,
    plot_name: String,
}

impl<S: ContentStore, E: Extractor> PlotContent<S, E> {
    /// Create for a plot or wizard scenario name
    pub fn new(name: &str, aliases: &HashMap<String, String>, importer: Importer<S, E>) -> Self {
        let plot_name = aliases.get(name).cloned().unwrap_or_else(|| name.to_string());

        Self {
            importer,
            plot_name,
        }
    }

    /// Plot directory name after alias resolution
    pub fn plot_name(&self) -> &str {
        &self.plot_name
    }

    /// Download, extract and parse the plot
    pub async fn import_content(&mut self) -> Result<&ContentTree, ImportError> {
        self.importer.import(&self.plot_name).await
    }

    /// Parse the plot from an earlier download
    pub fn import_downloaded_content(&mut self) -> Result<&ContentTree, ImportError> {
        self.importer.parse_existing(&self.plot_name)
    }

    /// Root level of this plot
    pub fn plot(&self) -> Option<&DirTree> {
        self.importer.content().plot(&self.plot_name)
    }

    fn entry(&self, name: &str, section: Option<&str>) -> Option<&FileEntry> {
        let plot = self.plot()?;

        match section.filter(|s| !s.is_empty()) {
            Some(section) => plot.get(section)?.as_dir()?.get(name),
            None => plot.get(name),
        }
    }

    /// Whether an entry named `name` exists in the section (or plot root)
    pub fn is_piece(&self, name: &str, section: Option<&str>) -> bool {
        self.entry(name, section).is_some()
    }

    /// Raw leaf record
    pub fn get_fdata(&self, name: &str, section: Option<&str>) -> Option<&FileLeaf> {
        self.entry(name, section)?.as_file()
    }

    pub fn get_piece(&self, name: &str, section: Option<&str>) -> Option<&Piece> {
        self.get_fdata(name, section)?.piece.as_ref()
    }

    /// One field of a piece
    pub fn get_val(
        &self,
        name: &str,
        field: PieceField,
        section: Option<&str>,
    ) -> Option<PieceValue<'_>> {
        Some(self.get_piece(name, section)?.get(field))
    }

    /// Attachment registered for the piece's thumbnail.
    ///
    /// Looks in the piece's own section first, then in `img`.
    pub fn get_thumb_attachment_id(&self, piece: &Piece) -> Option<&ContentId> {
        if piece.thumb.is_empty() {
            return None;
        }

        self.get_fdata(&piece.thumb, Some(&piece.piece_section))
            .and_then(|leaf| leaf.attachment_id.as_ref())
            .or_else(|| {
                self.get_fdata(&piece.thumb, Some(IMAGE_SECTION))
                    .and_then(|leaf| leaf.attachment_id.as_ref())
            })
    }

    /// Render piece body text to HTML
    pub fn parse_text(&self, text: &str) -> String {
        text::render_text(text)
    }
}
