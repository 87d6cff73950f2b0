//! HTML escaping and URL safety checks

/// Escape `& < > " '` so the text cannot be read as markup
///
/// # Examples
///
/// ```
/// use portfolio_core::render::escape_html;
///
/// assert_eq!(escape_html("<script>alert(1)</script>"), "&lt;script&gt;alert(1)&lt;/script&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

/// Append `text` to `out`, escaped
pub fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Whether a user-supplied URL may be placed in `src`/`href`
///
/// Allows `http(s)`, `mailto:`, `data:image/` and scheme-less relative
/// paths. Anything carrying another scheme (`javascript:`, `vbscript:`, ...)
/// is refused.
pub fn is_safe_url(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() {
        return false;
    }
    let lower: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect::<String>()
        .to_ascii_lowercase();

    if lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("mailto:")
        || lower.starts_with("data:image/")
    {
        return true;
    }

    // Relative URL: no scheme before the first path, query or fragment delimiter
    match lower.find(|c| matches!(c, ':' | '/' | '?' | '#')) {
        Some(i) => lower.as_bytes()[i] != b':',
        None => true,
    }
}
