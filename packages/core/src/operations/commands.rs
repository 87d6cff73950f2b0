//! Toolbar commands and markdown tokens
//!
//! Both sets are closed. Names coming from the UI are parsed with `FromStr`;
//! anything unrecognized is an [`UnknownCommand`] and the editor declines it.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown editor command: '{0}'")]
pub struct UnknownCommand(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn new(level: u8) -> Option<Self> {
        match level {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            _ => None,
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// ATX prefix including the trailing space, e.g. `"## "`
    pub fn markdown_prefix(&self) -> String {
        format!("{} ", "#".repeat(self.level() as usize))
    }
}

/// Formatting commands routed to the active block's editing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    BulletList,
    NumberedList,
    Heading(HeadingLevel),
    AlignLeft,
    AlignCenter,
    AlignRight,
    Justify,
}

impl FormatCommand {
    /// CSS `text-align` value for the alignment commands
    pub fn alignment(&self) -> Option<&'static str> {
        match self {
            FormatCommand::AlignLeft => Some("left"),
            FormatCommand::AlignCenter => Some("center"),
            FormatCommand::AlignRight => Some("right"),
            FormatCommand::Justify => Some("justify"),
            _ => None,
        }
    }
}

impl fmt::Display for FormatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatCommand::Bold => f.write_str("bold"),
            FormatCommand::Italic => f.write_str("italic"),
            FormatCommand::Underline => f.write_str("underline"),
            FormatCommand::BulletList => f.write_str("bulletList"),
            FormatCommand::NumberedList => f.write_str("numberedList"),
            FormatCommand::Heading(level) => write!(f, "h{}", level.level()),
            FormatCommand::AlignLeft => f.write_str("alignLeft"),
            FormatCommand::AlignCenter => f.write_str("alignCenter"),
            FormatCommand::AlignRight => f.write_str("alignRight"),
            FormatCommand::Justify => f.write_str("justify"),
        }
    }
}

impl FromStr for FormatCommand {
    type Err = UnknownCommand;

    /// Accepts toolbar names and their `execCommand` equivalents
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = match s.trim() {
            "bold" => FormatCommand::Bold,
            "italic" => FormatCommand::Italic,
            "underline" => FormatCommand::Underline,
            "bulletList" | "insertUnorderedList" => FormatCommand::BulletList,
            "numberedList" | "insertOrderedList" => FormatCommand::NumberedList,
            "h1" | "heading1" => FormatCommand::Heading(HeadingLevel::H1),
            "h2" | "heading2" => FormatCommand::Heading(HeadingLevel::H2),
            "h3" | "heading3" => FormatCommand::Heading(HeadingLevel::H3),
            "alignLeft" | "justifyLeft" => FormatCommand::AlignLeft,
            "alignCenter" | "justifyCenter" => FormatCommand::AlignCenter,
            "alignRight" | "justifyRight" => FormatCommand::AlignRight,
            "justify" | "justifyFull" => FormatCommand::Justify,
            other => return Err(UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

/// Markdown syntax inserted into plain-text surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkdownToken {
    Bold,
    Italic,
    Code,
    Heading(HeadingLevel),
    BulletList,
    NumberedList,
    Quote,
    Link,
    Image,
    Table,
    HorizontalRule,
}

impl FromStr for MarkdownToken {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = match s.trim() {
            "bold" => MarkdownToken::Bold,
            "italic" => MarkdownToken::Italic,
            "code" => MarkdownToken::Code,
            "h1" => MarkdownToken::Heading(HeadingLevel::H1),
            "h2" => MarkdownToken::Heading(HeadingLevel::H2),
            "h3" => MarkdownToken::Heading(HeadingLevel::H3),
            "ul" | "bulletList" => MarkdownToken::BulletList,
            "ol" | "numberedList" => MarkdownToken::NumberedList,
            "quote" | "blockquote" => MarkdownToken::Quote,
            "link" => MarkdownToken::Link,
            "image" => MarkdownToken::Image,
            "table" => MarkdownToken::Table,
            "hr" | "rule" => MarkdownToken::HorizontalRule,
            other => return Err(UnknownCommand(other.to_string())),
        };
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exec_command_names() {
        assert_eq!("justifyCenter".parse(), Ok(FormatCommand::AlignCenter));
        assert_eq!("insertOrderedList".parse(), Ok(FormatCommand::NumberedList));
        assert_eq!("h2".parse(), Ok(FormatCommand::Heading(HeadingLevel::H2)));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            "strikeThrough".parse::<FormatCommand>(),
            Err(UnknownCommand("strikeThrough".to_string()))
        );
        assert!("h4".parse::<MarkdownToken>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let all = [
            FormatCommand::Bold,
            FormatCommand::Italic,
            FormatCommand::Underline,
            FormatCommand::BulletList,
            FormatCommand::NumberedList,
            FormatCommand::Heading(HeadingLevel::H3),
            FormatCommand::AlignLeft,
            FormatCommand::AlignCenter,
            FormatCommand::AlignRight,
            FormatCommand::Justify,
        ];
        for command in all {
            assert_eq!(command.to_string().parse(), Ok(command));
        }
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(HeadingLevel::new(2).map(|h| h.markdown_prefix()), Some("## ".to_string()));
        assert_eq!(HeadingLevel::new(0), None);
        assert_eq!(HeadingLevel::new(4), None);
    }
}
