//! Per-block rendering
//!
//! [`render_block`] is total: malformed content degrades to a simpler, safe
//! representation instead of failing, because it runs on every keystroke of
//! the live preview.

use crate::models::{BlockKind, CalloutKind, ContentBlock};
use crate::render::escape::{escape_html, is_safe_url};
use crate::render::highlight::{Highlighter, PlainHighlighter};
use crate::render::markdown::render_markdown;
use crate::render::table::render_table;
use crate::render::video::render_video;

/// Alt text used when an image has neither alt text nor caption
pub const IMAGE_ALT_FALLBACK: &str = "Image";

/// Render one block to an HTML fragment for the live preview
///
/// # Examples
///
/// ```
/// use portfolio_core::models::{BlockType, ContentBlock};
/// use portfolio_core::render::render_block;
///
/// let block = ContentBlock::with_content(BlockType::Table, 0, "a,b\n1,2");
/// assert!(render_block(&block).starts_with("<table"));
/// ```
pub fn render_block(block: &ContentBlock) -> String {
    render_block_with(block, &PlainHighlighter)
}

/// Render one block, passing code through `highlighter`
pub fn render_block_with(block: &ContentBlock, highlighter: &dyn Highlighter) -> String {
    match &block.kind {
        BlockKind::Text => render_markdown(&block.content),
        BlockKind::Code {
            language,
            file_name,
        } => render_code(&block.content, language, file_name.as_deref(), highlighter),
        BlockKind::Image { caption, alt_text } => {
            render_image(&block.content, caption.as_deref(), alt_text.as_deref())
        }
        BlockKind::Video { title } => render_video(&block.content, title.as_deref()),
        BlockKind::Table => render_table(&block.content),
        BlockKind::Diagram => format!(
            "<div class=\"diagram-block\">{}</div>",
            render_markdown(&block.content)
        ),
        BlockKind::Callout { metadata } => render_callout(&block.content, metadata.kind),
    }
}

/// `<pre><code class="language-…">` with optional file name label
pub fn render_code(
    code: &str,
    language: &str,
    file_name: Option<&str>,
    highlighter: &dyn Highlighter,
) -> String {
    let language = language_class(language);
    let mut out = String::from("<div class=\"code-block\">");
    if let Some(name) = file_name.map(str::trim).filter(|n| !n.is_empty()) {
        out.push_str("<div class=\"code-filename\">");
        out.push_str(&escape_html(name));
        out.push_str("</div>");
    }
    out.push_str(&format!("<pre><code class=\"language-{}\">", language));
    out.push_str(&highlighter.highlight(code, &language));
    out.push_str("</code></pre></div>");
    out
}

/// Keep a language tag usable as a CSS class suffix
fn language_class(language: &str) -> String {
    let cleaned: String = language
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '#' | '.'))
        .collect();
    if cleaned.is_empty() {
        crate::utils::PLAINTEXT.to_string()
    } else {
        cleaned
    }
}

fn render_image(url: &str, caption: Option<&str>, alt_text: Option<&str>) -> String {
    let url = url.trim();
    if !is_safe_url(url) {
        if !url.is_empty() {
            tracing::debug!(url, "Refusing unsafe image URL");
        }
        return String::new();
    }
    let caption = caption.map(str::trim).filter(|c| !c.is_empty());
    let alt = alt_text
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .or(caption)
        .unwrap_or(IMAGE_ALT_FALLBACK);

    let mut out = format!(
        "<figure class=\"image-block\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
        escape_html(url),
        escape_html(alt)
    );
    if let Some(caption) = caption {
        out.push_str("<figcaption>");
        out.push_str(&escape_html(caption));
        out.push_str("</figcaption>");
    }
    out.push_str("</figure>");
    out
}

fn render_callout(content: &str, kind: CalloutKind) -> String {
    format!(
        "<div class=\"callout callout-{}\"><span class=\"callout-icon\">{}</span><div class=\"callout-content\">{}</div></div>",
        kind.as_str(),
        kind.icon(),
        render_markdown(content)
    )
}
