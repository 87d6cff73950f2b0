//! Whole-document rendering: block documents and the legacy markdown path

use crate::models::{Document, DocumentBody};
use crate::render::block::{render_block_with, render_code};
use crate::render::escape::escape_html;
use crate::render::highlight::{Highlighter, PlainHighlighter};
use crate::render::markdown::render_markdown;

/// Render every block in order, or the legacy body
pub fn render_document(document: &Document) -> String {
    render_document_with(document, &PlainHighlighter)
}

/// Display-time rendering with a syntax highlighter for code
pub fn render_document_with(document: &Document, highlighter: &dyn Highlighter) -> String {
    match document.body() {
        DocumentBody::Legacy(markdown) => format!(
            "<div class=\"legacy-content\">{}</div>",
            render_legacy_markdown_with(markdown, highlighter)
        ),
        DocumentBody::Blocks(blocks) => {
            let mut out = String::new();
            for block in blocks {
                out.push_str(&format!(
                    "<section class=\"content-block content-block-{}\" data-block-id=\"{}\">",
                    block.block_type(),
                    escape_html(&block.id)
                ));
                out.push_str(&render_block_with(block, highlighter));
                out.push_str("</section>");
            }
            out
        }
    }
}

/// Render a legacy whole-document markdown string
///
/// Fenced code sections become code blocks; everything between them goes
/// through the text markdown path. An unterminated fence runs to the end of
/// the document.
pub fn render_legacy_markdown(markdown: &str) -> String {
    render_legacy_markdown_with(markdown, &PlainHighlighter)
}

fn render_legacy_markdown_with(markdown: &str, highlighter: &dyn Highlighter) -> String {
    let mut out = String::new();
    let mut prose: Vec<&str> = Vec::new();
    let mut fence: Option<(String, Vec<&str>)> = None;

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        match fence.take() {
            Some((language, mut code)) => {
                if trimmed.starts_with("```") {
                    out.push_str(&render_code(&code.join("\n"), &language, None, highlighter));
                } else {
                    code.push(line);
                    fence = Some((language, code));
                }
            }
            None => {
                if let Some(info) = trimmed.strip_prefix("```") {
                    flush_prose(&mut out, &mut prose);
                    fence = Some((info.trim().to_string(), Vec::new()));
                } else {
                    prose.push(line);
                }
            }
        }
    }

    if let Some((language, code)) = fence {
        out.push_str(&render_code(&code.join("\n"), &language, None, highlighter));
    }
    flush_prose(&mut out, &mut prose);
    out
}

fn flush_prose(out: &mut String, prose: &mut Vec<&str>) {
    if prose.iter().any(|l| !l.trim().is_empty()) {
        out.push_str(&render_markdown(prose.join("\n").trim_matches('\n')));
    }
    prose.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockType, DocumentKind};

    #[test]
    fn test_blocks_in_order() {
        let mut doc = Document::new(DocumentKind::Tutorial, "Doc");
        doc.insert(BlockType::Text);
        doc.set_block_content(0, "first");
        doc.insert(BlockType::Text);
        doc.set_block_content(1, "second");
        doc.reorder(1, 0);

        let html = render_document(&doc);
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(second < first);
        assert_eq!(html.matches("<section class=\"content-block content-block-text\"").count(), 2);
    }

    #[test]
    fn test_legacy_with_fence() {
        let html = render_legacy_markdown("# Setup\nInstall:\n```bash\nnpm i <pkg>\n```\nDone");
        assert_eq!(
            html,
            "<h1>Setup</h1>Install:<div class=\"code-block\"><pre><code class=\"language-bash\">npm i &lt;pkg&gt;</code></pre></div>Done"
        );
    }

    #[test]
    fn test_legacy_unterminated_fence() {
        let html = render_legacy_markdown("```\nlet x = 1;");
        assert!(html.contains("<code class=\"language-plaintext\">let x = 1;</code>"));
    }

    #[test]
    fn test_legacy_document_wrapper() {
        let doc = Document::from_legacy_markdown(DocumentKind::Solution, "Old", "**hi**");
        assert_eq!(
            render_document(&doc),
            "<div class=\"legacy-content\"><strong>hi</strong></div>"
        );
    }

    #[test]
    fn test_empty_documents() {
        assert_eq!(render_document(&Document::new(DocumentKind::Tutorial, "x")), "");
        assert_eq!(render_legacy_markdown(""), "");
    }
}
