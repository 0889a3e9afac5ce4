//! Parsed content items.
//!
//! A `Piece` is the normalized form of one front-matter file: a fixed set of
//! string fields plus the tag and category lists split out of their raw
//! comma-separated values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Category token that never makes it into `Piece::cat`
const UNCATEGORIZED: &str = "uncategorized";

/// One normalized content item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub title: String,
    pub lead: String,
    pub content: String,
    pub slug: String,
    pub url: String,
    pub thumb: String,

    /// Tags, trimmed, no empty entries
    #[serde(default)]
    pub tags: Vec<String>,

    /// Categories, trimmed, no empty entries and no "uncategorized"
    #[serde(default)]
    pub cat: Vec<String>,

    /// File name without the `.md` suffix
    pub piece_name: String,

    /// Directory the file was found under (empty at the plot root)
    pub piece_section: String,
}

impl Piece {
    /// Build a piece from parsed front-matter fields.
    ///
    /// Unknown keys are ignored, missing keys default to empty.
    pub fn from_fields(
        fields: &HashMap<String, String>,
        piece_name: impl Into<String>,
        piece_section: impl Into<String>,
    ) -> Self {
        let text = |key: &str| fields.get(key).cloned().unwrap_or_default();

        Self {
            title: text("title"),
            lead: text("lead"),
            content: text("content"),
            slug: text("slug"),
            url: text("url"),
            thumb: text("thumb"),
            tags: split_terms(fields.get("tags").map(String::as_str).unwrap_or_default())
                .collect(),
            cat: split_terms(fields.get("cat").map(String::as_str).unwrap_or_default())
                .filter(|term| !term.eq_ignore_ascii_case(UNCATEGORIZED))
                .collect(),
            piece_name: piece_name.into(),
            piece_section: piece_section.into(),
        }
    }

    /// Slug to publish the piece under.
    ///
    /// An explicit `slug` wins; otherwise `<section>-<name>`, or just the
    /// name at the plot root.
    pub fn post_slug(&self) -> String {
        if !self.slug.is_empty() {
            return self.slug.clone();
        }

        if self.piece_section.is_empty() {
            self.piece_name.clone()
        } else {
            format!("{}-{}", self.piece_section, self.piece_name)
        }
    }

    /// Read a single field by name
    pub fn get(&self, field: PieceField) -> PieceValue<'_> {
        match field {
            PieceField::Title => PieceValue::Text(&self.title),
            PieceField::Lead => PieceValue::Text(&self.lead),
            PieceField::Content => PieceValue::Text(&self.content),
            PieceField::Slug => PieceValue::Text(&self.slug),
            PieceField::Url => PieceValue::Text(&self.url),
            PieceField::Thumb => PieceValue::Text(&self.thumb),
            PieceField::Tags => PieceValue::List(&self.tags),
            PieceField::Cat => PieceValue::List(&self.cat),
            PieceField::PieceName => PieceValue::Text(&self.piece_name),
            PieceField::PieceSection => PieceValue::Text(&self.piece_section),
        }
    }
}

/// Split a comma-separated list, dropping blank entries
fn split_terms(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
}

/// Closed set of readable piece fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceField {
    Title,
    Lead,
    Content,
    Slug,
    Url,
    Thumb,
    Tags,
    Cat,
    PieceName,
    PieceSection,
}

impl PieceField {
    /// All fields, in declaration order
    pub const ALL: [PieceField; 10] = [
        PieceField::Title,
        PieceField::Lead,
        PieceField::Content,
        PieceField::Slug,
        PieceField::Url,
        PieceField::Thumb,
        PieceField::Tags,
        PieceField::Cat,
        PieceField::PieceName,
        PieceField::PieceSection,
    ];

    /// Front-matter key for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceField::Title => "title",
            PieceField::Lead => "lead",
            PieceField::Content => "content",
            PieceField::Slug => "slug",
            PieceField::Url => "url",
            PieceField::Thumb => "thumb",
            PieceField::Tags => "tags",
            PieceField::Cat => "cat",
            PieceField::PieceName => "piece_name",
            PieceField::PieceSection => "piece_section",
        }
    }
}

impl std::fmt::Display for PieceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PieceField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        PieceField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown piece field: {}", s))
    }
}

/// Borrowed value of a single piece field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceValue<'a> {
    Text(&'a str),
    List(&'a [String]),
}

impl std::fmt::Display for PieceValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceValue::Text(s) => f.write_str(s),
            PieceValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}
