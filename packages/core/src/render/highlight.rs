//! Syntax highlighting seam
//!
//! Highlighting happens at display time on code that has already been placed
//! into a `<code>` element; the block model never stores highlighted output.

use crate::render::escape::escape_html;

/// Turns source text into HTML for the inside of a `<code>` element
///
/// Implementations must escape anything they do not wrap in their own markup.
pub trait Highlighter {
    fn highlight(&self, code: &str, language: &str) -> String;
}

/// Escapes only; leaves colouring to client-side highlighters keyed on the
/// `language-*` class
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, _language: &str) -> String {
        escape_html(code)
    }
}
