//! Body text rendering.
//!
//! `//` remarks become `[knd_r]...[/knd_r]` shortcodes, then the text is
//! rendered from Markdown to HTML.

use std::sync::OnceLock;

use pulldown_cmark::{html, Parser};
use regex::Regex;

/// Matches a `//` remark up to and including the line break
fn remark_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"//(.*?)(\n|$)").expect("remark pattern is valid"))
}

/// Replace `//` remarks with `[knd_r]` shortcodes
pub fn mark_remarks(text: &str) -> String {
    remark_pattern()
        .replace_all(text, "[knd_r]${1}[/knd_r]")
        .into_owned()
}

/// Render body text to HTML
pub fn render_text(text: &str) -> String {
    let marked = mark_remarks(text);

    let mut out = String::with_capacity(marked.len() * 3 / 2);
    html::push_html(&mut out, Parser::new(&marked));
    out
}
