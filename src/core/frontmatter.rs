//! Front-matter parsing for `+++`-delimited content files.
//!
//! ```text
//! title = "Color line"
//! tags = one, two
//! +++
//!
//! Body text here
//! ```
//!
//! Everything before the first `+++` is the header, everything after the
//! last `+++` is the body.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

/// Header/body delimiter
pub const DELIMITER: &str = "+++";

/// Key the body text is stored under
pub const CONTENT_KEY: &str = "content";

/// Quote characters stripped from around header values
const QUOTES: [char; 4] = ['\'', '"', '\u{201C}', '\u{201D}'];

/// Read and parse a content file from disk
pub fn parse_file(path: &Path) -> Result<HashMap<String, String>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read content file: {}", path.display()))?;

    Ok(parse_post(&String::from_utf8_lossy(&bytes)))
}

/// Parse file text into header fields plus `content`
pub fn parse_post(text: &str) -> HashMap<String, String> {
    let parts: Vec<&str> = text.split(DELIMITER).collect();

    let mut fields = if parts.len() > 1 {
        parse_header(parts[0])
    } else {
        HashMap::new()
    };

    // split() always yields at least one part
    let body = parts.last().copied().unwrap_or_default().trim();
    fields.insert(CONTENT_KEY.to_string(), body.to_string());

    fields
}

/// Parse `key = value` lines; lines without `=` or with an empty key are skipped
pub fn parse_header(header: &str) -> HashMap<String, String> {
    header
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim()).trim().to_string()))
        })
        .collect()
}

/// Strip at most one quote character from each end
fn unquote(value: &str) -> &str {
    let value = value.strip_prefix(QUOTES).unwrap_or(value);
    value.strip_suffix(QUOTES).unwrap_or(value)
}
