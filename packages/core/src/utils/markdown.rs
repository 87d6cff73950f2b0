//! Markdown stripping for excerpts, search text and reading time
//!
//! Produces plain text from the markdown subset the editor writes, plus the
//! handful of formatting tags rich surfaces leave behind.

use regex::Regex;
use std::sync::LazyLock;

/// Compiled stripping patterns, applied in order
///
/// 1. Fences and images before links (an image is a link with a `!`)
/// 2. Bold before italic (`**` contains `*`)
/// 3. Line-start markers last, one line at a time
static MARKDOWN_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        // Code fences keep their body: ```rust -> ""
        (Regex::new(r"(?m)^```[^\n]*$").unwrap(), ""),
        // Images: ![alt](url) -> alt
        (Regex::new(r"!\[([^\]]*)\]\([^)]+\)").unwrap(), "$1"),
        // Links: [text](url) -> text
        (Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap(), "$1"),
        // Inline code: `code` -> code
        (Regex::new(r"`([^`]+)`").unwrap(), "$1"),
        // Bold: **text** -> text
        (Regex::new(r"\*\*([^*]+)\*\*").unwrap(), "$1"),
        // Italic: *text* -> text
        (Regex::new(r"\*([^*\s][^*]*)\*").unwrap(), "$1"),
        // Formatting tags left by rich surfaces: <b>, </div>, <br/>
        (Regex::new(r"</?[a-zA-Z][^>]*>").unwrap(), " "),
        // Headers: ## Title -> Title
        (Regex::new(r"^#{1,3}\s+").unwrap(), ""),
        // Blockquotes: > quote -> quote
        (Regex::new(r"^>\s*").unwrap(), ""),
        // Ordered list markers: 1. item -> item
        (Regex::new(r"^\d+\.\s+").unwrap(), ""),
        // Unordered list markers: - item -> item
        (Regex::new(r"^[-*]\s+").unwrap(), ""),
        // Horizontal rules and table separator rows
        (Regex::new(r"^[-|\s:]{3,}$").unwrap(), ""),
    ]
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip markdown formatting, collapsing whitespace to single spaces
///
/// # Examples
///
/// ```
/// use portfolio_core::utils::strip_markdown;
///
/// assert_eq!(strip_markdown("## Getting **started**"), "Getting started");
/// assert_eq!(strip_markdown("See [the docs](https://angular.dev)"), "See the docs");
/// ```
pub fn strip_markdown(content: &str) -> String {
    let mut result = content.to_string();

    for (pattern, replacement) in MARKDOWN_PATTERNS.iter() {
        if pattern.as_str().starts_with('^') {
            result = result
                .lines()
                .map(|line| pattern.replace_all(line, *replacement).into_owned())
                .collect::<Vec<_>>()
                .join("\n");
        } else {
            result = pattern.replace_all(&result, *replacement).into_owned();
        }
    }

    WHITESPACE_RE.replace_all(&result, " ").trim().to_string()
}

/// Number of words once markdown syntax is removed
pub fn count_words(content: &str) -> usize {
    strip_markdown(content).split_whitespace().count()
}
