//! Plain-text (markdown) editing surface
//!
//! [`TextArea`] models a `<textarea>`: its text plus a selection measured in
//! character offsets. Markdown tokens are inserted around the selection and
//! the selection is moved to a deterministic place afterwards:
//!
//! - inline wrappers (`**`, `*`, `` ` ``, links, images) re-select the text
//!   they wrapped, or select the placeholder when nothing was selected
//! - line prefixes (headings, lists, quotes) start a new line unless the
//!   selection already starts one, then select the prefixed text
//! - tables and rules go on their own lines after the selection and leave the
//!   caret behind them

use crate::operations::commands::{FormatCommand, MarkdownToken};
use crate::operations::surface::EditingSurface;

/// Spaces inserted by Tab and removed by Shift+Tab
pub const INDENT: &str = "    ";

const TABLE_SKELETON: &str = "| Header 1 | Header 2 | Header 3 |\n\
| -------- | -------- | -------- |\n\
| Cell 1   | Cell 2   | Cell 3   |\n\
| Cell 4   | Cell 5   | Cell 6   |";

/// A selection in character offsets; `anchor == head` is a caret
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextArea {
    text: String,
    selection: Selection,
    focused: bool,
}

impl TextArea {
    /// New surface with the caret at the end of `text`
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.chars().count();
        Self {
            text,
            selection: Selection::caret(end),
            focused: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the whole text (model → surface sync); caret moves to the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selection = Selection::caret(self.len_chars());
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Select `anchor..head`, clamped to the text
    pub fn select(&mut self, anchor: usize, head: usize) {
        let len = self.len_chars();
        self.selection = Selection::new(anchor.min(len), head.min(len));
    }

    pub fn set_caret(&mut self, offset: usize) {
        self.select(offset, offset);
    }

    pub fn selected_text(&self) -> &str {
        self.slice(self.selection.start(), self.selection.end())
    }

    fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn slice(&self, start: usize, end: usize) -> &str {
        &self.text[self.byte_offset(start)..self.byte_offset(end)]
    }

    fn char_before(&self, offset: usize) -> Option<char> {
        offset.checked_sub(1).and_then(|i| self.text.chars().nth(i))
    }

    fn replace(&mut self, start: usize, end: usize, replacement: &str) {
        let range = self.byte_offset(start)..self.byte_offset(end);
        self.text.replace_range(range, replacement);
    }

    fn starts_line(&self, offset: usize) -> bool {
        matches!(self.char_before(offset), None | Some('\n'))
    }

    /// Insert markdown syntax for `token` around the current selection
    pub fn insert_markdown_token(&mut self, token: MarkdownToken) {
        match token {
            MarkdownToken::Bold => self.wrap_selection("**", "**", "bold text"),
            MarkdownToken::Italic => self.wrap_selection("*", "*", "italic text"),
            MarkdownToken::Code => self.wrap_selection("`", "`", "code"),
            MarkdownToken::Link => self.wrap_selection("[", "](url)", "link text"),
            MarkdownToken::Image => self.wrap_selection("![", "](image-url)", "alt text"),
            MarkdownToken::Heading(level) => {
                let prefix = level.markdown_prefix();
                self.prefix_lines(&|_: usize| prefix.clone(), false, "Heading")
            }
            MarkdownToken::BulletList => self.prefix_lines(&|_: usize| "- ".to_string(), true, "List item"),
            MarkdownToken::NumberedList => {
                self.prefix_lines(&|i: usize| format!("{}. ", i + 1), true, "List item")
            }
            MarkdownToken::Quote => self.prefix_lines(&|_: usize| "> ".to_string(), true, "Quote"),
            MarkdownToken::Table => self.insert_block(TABLE_SKELETON),
            MarkdownToken::HorizontalRule => self.insert_block("---"),
        }
    }

    fn wrap_selection(&mut self, before: &str, after: &str, placeholder: &str) {
        let (start, end) = (self.selection.start(), self.selection.end());
        let selected = self.slice(start, end);
        let inner = if selected.is_empty() {
            placeholder.to_string()
        } else {
            selected.to_string()
        };
        self.replace(start, end, &format!("{}{}{}", before, inner, after));

        let inner_start = start + before.chars().count();
        self.selection = Selection::new(inner_start, inner_start + inner.chars().count());
    }

    fn prefix_lines(&mut self, prefix: &dyn Fn(usize) -> String, every_line: bool, placeholder: &str) {
        let (start, end) = (self.selection.start(), self.selection.end());
        let selected = self.slice(start, end);
        let inner = if selected.is_empty() {
            placeholder.to_string()
        } else {
            selected.to_string()
        };
        let lead = if self.starts_line(start) { "" } else { "\n" };
        let body = if every_line {
            inner
                .split('\n')
                .enumerate()
                .map(|(i, line)| format!("{}{}", prefix(i), line))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            format!("{}{}", prefix(0), inner)
        };
        let replacement = format!("{}{}", lead, body);
        self.replace(start, end, &replacement);

        let selection_start = start + lead.len() + prefix(0).chars().count();
        self.selection = Selection::new(selection_start, start + replacement.chars().count());
    }

    fn insert_block(&mut self, snippet: &str) {
        let at = self.selection.end();
        let lead = if self.starts_line(at) { "" } else { "\n" };
        let insertion = format!("{}{}\n", lead, snippet);
        self.replace(at, at, &insertion);
        self.selection = Selection::caret(at + insertion.chars().count());
    }

    /// Tab: replace the selection with four spaces
    pub fn indent(&mut self) {
        let (start, end) = (self.selection.start(), self.selection.end());
        self.replace(start, end, INDENT);
        self.selection = Selection::caret(start + INDENT.len());
    }

    /// Shift+Tab: drop four leading spaces or one tab from the current line
    ///
    /// Returns `false` when the line starts with neither.
    pub fn outdent(&mut self) -> bool {
        let start = self.selection.start();
        let line_start = (0..start)
            .rev()
            .find(|&i| self.text.chars().nth(i) == Some('\n'))
            .map(|i| i + 1)
            .unwrap_or(0);
        let line = self.slice(line_start, self.len_chars());
        let removed = if line.starts_with(INDENT) {
            INDENT.len()
        } else if line.starts_with('\t') {
            1
        } else {
            return false;
        };
        self.replace(line_start, line_start + removed, "");

        let shift = |pos: usize| {
            if pos >= line_start + removed {
                pos - removed
            } else {
                pos.min(line_start)
            }
        };
        self.selection = Selection::new(shift(self.selection.anchor), shift(self.selection.head));
        true
    }
}

impl EditingSurface for TextArea {
    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    /// Formatting acts on the focused surface only
    fn execute(&mut self, command: FormatCommand) -> bool {
        if !self.focused {
            return false;
        }
        match command {
            FormatCommand::Bold => self.insert_markdown_token(MarkdownToken::Bold),
            FormatCommand::Italic => self.insert_markdown_token(MarkdownToken::Italic),
            FormatCommand::BulletList => self.insert_markdown_token(MarkdownToken::BulletList),
            FormatCommand::NumberedList => self.insert_markdown_token(MarkdownToken::NumberedList),
            FormatCommand::Heading(level) => {
                self.insert_markdown_token(MarkdownToken::Heading(level))
            }
            FormatCommand::Underline => self.wrap_selection("<u>", "</u>", "underlined text"),
            FormatCommand::AlignLeft
            | FormatCommand::AlignCenter
            | FormatCommand::AlignRight
            | FormatCommand::Justify => {
                let align = command.alignment().unwrap_or("left");
                let open = format!("<div style=\"text-align: {};\">", align);
                self.wrap_selection(&open, "</div>", "aligned text")
            }
        }
        true
    }

    fn content(&self) -> String {
        self.text.clone()
    }

    fn insert_markdown(&mut self, token: MarkdownToken) -> bool {
        self.insert_markdown_token(token);
        true
    }

    fn handle_tab(&mut self, shift: bool) -> bool {
        if shift {
            self.outdent()
        } else {
            self.indent();
            true
        }
    }
}
