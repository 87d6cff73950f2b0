//! Constrained markdown renderer
//!
//! Only a fixed subset is recognized; everything else is literal text and is
//! escaped:
//!
//! - line level: ATX headers `#`, `##`, `###`; unordered items (`- `, `* `);
//!   ordered items (`1. `); every other newline becomes `<br>`
//! - inline, in this order: bold `**..**`, italic `*..*`, inline code `` `..` ``
//! - formatting tags written by rich editing surfaces (`<b>`, `<em>`,
//!   `<div style="text-align: center;">`, ...) from a fixed allow-list
//!
//! Allow-listed tags are balanced: a closer with no matching opener is
//! dropped, and openers still pending when their heading, list item or
//! emphasis span ends (or the input ends) are closed there.
//!
//! Lines are classified first, so a list marker is never consumed as italic.
//! Inline constructs are built as a tree: bold spans are found on the raw
//! text, italics only inside text that is not already a delimiter, and code
//! spans last. A later stage never reaches across a span produced by an earlier
//! one, so the output is always well nested.

use crate::render::escape::push_escaped;
use regex::Regex;
use std::sync::LazyLock;

/// Formatting tags a rich surface may leave in a text block
static ALLOWED_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<(/?)(b|strong|i|em|u|p|div|h[1-3]|ul|ol|li)(?:\s+style\s*=\s*"\s*text-align\s*:\s*(left|center|right|justify)\s*;?\s*")?\s*>|<br\s*/?>"#,
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq)]
enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Em(Vec<Inline>),
    Code(String),
    Open { name: String, html: String },
    Close(String),
    Break,
}

/// Open allow-listed tags, one frame per enclosing construct
struct TagBalancer {
    frames: Vec<Vec<String>>,
}

impl TagBalancer {
    fn new() -> Self {
        Self { frames: vec![Vec::new()] }
    }

    fn enter(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Close whatever the innermost frame left open and pop it
    fn leave(&mut self, out: &mut String) {
        if let Some(open) = self.frames.pop() {
            for name in open.iter().rev() {
                out.push_str(&format!("</{}>", name));
            }
        }
        if self.frames.is_empty() {
            self.frames.push(Vec::new());
        }
    }

    fn open(&mut self, out: &mut String, name: &str, html: &str) {
        out.push_str(html);
        if let Some(frame) = self.frames.last_mut() {
            frame.push(name.to_string());
        }
    }

    fn close(&mut self, out: &mut String, name: &str) {
        let Some(frame) = self.frames.last_mut() else {
            return;
        };
        let Some(at) = frame.iter().rposition(|open| open == name) else {
            return;
        };
        for inner in frame.drain(at..).rev() {
            out.push_str(&format!("</{}>", inner));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

#[derive(Debug, PartialEq)]
enum Line<'a> {
    Heading(u8, &'a str),
    Item(ListKind, &'a str),
    Text(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    for (prefix, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Line::Heading(level, rest);
        }
    }
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Line::Item(ListKind::Unordered, rest);
    }
    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(". ") {
            return Line::Item(ListKind::Ordered, rest);
        }
    }
    Line::Text(line)
}

/// Render the markdown subset to HTML
///
/// # Examples
///
/// ```
/// use portfolio_core::render::render_markdown;
///
/// assert_eq!(render_markdown("**a*b*c**"), "<strong>a<em>b</em>c</strong>");
/// assert_eq!(render_markdown("# Title"), "<h1>Title</h1>");
/// ```
pub fn render_markdown(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 16);
    let mut open_list: Option<ListKind> = None;
    let mut previous_was_text = false;
    let mut tags = TagBalancer::new();

    for raw in input.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        match classify(line) {
            Line::Heading(level, text) => {
                close_list(&mut out, &mut open_list);
                out.push_str(&format!("<h{}>", level));
                push_framed(&mut out, text, &mut tags);
                out.push_str(&format!("</h{}>", level));
                previous_was_text = false;
            }
            Line::Item(kind, text) => {
                if open_list != Some(kind) {
                    close_list(&mut out, &mut open_list);
                    out.push_str(&format!("<{}>", kind.tag()));
                    open_list = Some(kind);
                }
                out.push_str("<li>");
                push_framed(&mut out, text, &mut tags);
                out.push_str("</li>");
                previous_was_text = false;
            }
            Line::Text(text) => {
                close_list(&mut out, &mut open_list);
                if previous_was_text {
                    out.push_str("<br>");
                }
                push_inline(&mut out, text, &mut tags);
                previous_was_text = true;
            }
        }
    }
    close_list(&mut out, &mut open_list);
    tags.leave(&mut out);
    out
}

/// Render one line of inline markdown (no line-level constructs)
pub fn render_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut tags = TagBalancer::new();
    push_inline(&mut out, text, &mut tags);
    tags.leave(&mut out);
    out
}

fn close_list(out: &mut String, open_list: &mut Option<ListKind>) {
    if let Some(kind) = open_list.take() {
        out.push_str(&format!("</{}>", kind.tag()));
    }
}

fn push_inline(out: &mut String, text: &str, tags: &mut TagBalancer) {
    for node in parse_inline(text) {
        write_inline(out, &node, tags);
    }
}

fn push_framed(out: &mut String, text: &str, tags: &mut TagBalancer) {
    tags.enter();
    push_inline(out, text, tags);
    tags.leave(out);
}

fn parse_inline(text: &str) -> Vec<Inline> {
    let nodes = vec![Inline::Text(text.to_string())];
    let nodes = apply_delimiter(nodes, "**", &|inner: &str| {
        Inline::Strong(vec![Inline::Text(inner.to_string())])
    });
    let nodes = apply_delimiter(nodes, "*", &|inner: &str| {
        Inline::Em(vec![Inline::Text(inner.to_string())])
    });
    let nodes = apply_delimiter(nodes, "`", &|inner: &str| Inline::Code(inner.to_string()));
    apply_tags(nodes)
}

/// Split every text node on `marker` pairs, recursing into strong/em
fn apply_delimiter(
    nodes: Vec<Inline>,
    marker: &str,
    wrap: &dyn Fn(&str) -> Inline,
) -> Vec<Inline> {
    let mut result = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Inline::Text(text) => {
                for segment in split_delimited(&text, marker) {
                    match segment {
                        Segment::Plain(plain) => result.push(Inline::Text(plain.to_string())),
                        Segment::Wrapped(inner) => result.push(wrap(inner)),
                    }
                }
            }
            Inline::Strong(children) => {
                result.push(Inline::Strong(apply_delimiter(children, marker, wrap)))
            }
            Inline::Em(children) => result.push(Inline::Em(apply_delimiter(children, marker, wrap))),
            leaf => result.push(leaf),
        }
    }
    result
}

#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Plain(&'a str),
    Wrapped(&'a str),
}

/// Leftmost, shortest `marker content marker` pairs whose content is not
/// itself made of marker characters
fn split_delimited<'a>(text: &'a str, marker: &str) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut rest_start = 0;
    let mut search = 0;

    while let Some(rel_open) = text[search..].find(marker) {
        let open = search + rel_open;
        let content_start = open + marker.len();
        let Some(first) = text[content_start..].chars().next() else {
            break;
        };
        let min_close = content_start + first.len_utf8();
        // A later opener has a later minimum close, so no pair exists past here.
        let Some(rel_close) = text[min_close..].find(marker) else {
            break;
        };
        let close = min_close + rel_close;
        // A run made only of delimiter characters stays literal
        if text[content_start..close].chars().all(|c| marker.contains(c)) {
            let run: usize = text[open..]
                .chars()
                .take_while(|c| marker.contains(*c))
                .map(char::len_utf8)
                .sum();
            search = open + run;
            continue;
        }
        if open > rest_start {
            segments.push(Segment::Plain(&text[rest_start..open]));
        }
        segments.push(Segment::Wrapped(&text[content_start..close]));
        rest_start = close + marker.len();
        search = rest_start;
    }

    if rest_start < text.len() {
        segments.push(Segment::Plain(&text[rest_start..]));
    }
    segments
}

fn apply_tags(nodes: Vec<Inline>) -> Vec<Inline> {
    let mut result = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Inline::Text(text) => {
                let mut last = 0;
                for caps in ALLOWED_TAG_RE.captures_iter(&text) {
                    let Some(whole) = caps.get(0) else { continue };
                    if whole.start() > last {
                        result.push(Inline::Text(text[last..whole.start()].to_string()));
                    }
                    result.push(tag_node(&caps));
                    last = whole.end();
                }
                if last < text.len() {
                    result.push(Inline::Text(text[last..].to_string()));
                }
            }
            Inline::Strong(children) => result.push(Inline::Strong(apply_tags(children))),
            Inline::Em(children) => result.push(Inline::Em(apply_tags(children))),
            leaf => result.push(leaf),
        }
    }
    result
}

/// Rebuild an allow-listed tag from its parts so no original bytes pass through
fn tag_node(caps: &regex::Captures<'_>) -> Inline {
    let Some(name) = caps.get(2) else {
        return Inline::Break;
    };
    let name = name.as_str().to_ascii_lowercase();
    let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
    if closing {
        return Inline::Close(name);
    }
    let html = match caps.get(3) {
        Some(align) if name == "p" || name == "div" => format!(
            "<{} style=\"text-align: {};\">",
            name,
            align.as_str().to_ascii_lowercase()
        ),
        _ => format!("<{}>", name),
    };
    Inline::Open { name, html }
}

fn write_inline(out: &mut String, node: &Inline, tags: &mut TagBalancer) {
    match node {
        Inline::Text(text) => push_escaped(out, text),
        Inline::Strong(children) => {
            out.push_str("<strong>");
            tags.enter();
            children.iter().for_each(|c| write_inline(out, c, tags));
            tags.leave(out);
            out.push_str("</strong>");
        }
        Inline::Em(children) => {
            out.push_str("<em>");
            tags.enter();
            children.iter().for_each(|c| write_inline(out, c, tags));
            tags.leave(out);
            out.push_str("</em>");
        }
        Inline::Code(code) => {
            out.push_str("<code>");
            push_escaped(out, code);
            out.push_str("</code>");
        }
        Inline::Open { name, html } => tags.open(out, name, html),
        Inline::Close(name) => tags.close(out, name),
        Inline::Break => out.push_str("<br>"),
    }
}
