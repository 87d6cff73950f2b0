//! Content Block Data Structures
//!
//! A content block is one typed unit of a tutorial or solution: a text
//! paragraph, a code listing, an image, an embedded video, a table, a diagram
//! or a callout. Blocks are owned by exactly one [`Document`](super::Document)
//! and carry a dense zero-based `order` that the document renormalizes after
//! every structural mutation.
//!
//! # Type-specific fields
//!
//! Fields that only make sense for one block type live on the matching
//! [`BlockKind`] variant. On the wire the block stays a flat object:
//!
//! ```json
//! { "id": "…", "type": "code", "content": "let x = 1;", "order": 0,
//!   "language": "rust", "fileName": "main.rs" }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use portfolio_core::models::{BlockType, ContentBlock};
//!
//! let block = ContentBlock::new(BlockType::Code, 0);
//! assert_eq!(block.block_type(), BlockType::Code);
//! assert_eq!(block.language(), Some("javascript"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Language assigned to freshly inserted code blocks
pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";

/// Opaque, stable block identifier (UUID v4). Never reused.
pub type BlockId = String;

/// Error returned when a block type name is not part of the closed set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown block type: '{0}'")]
pub struct UnknownBlockType(pub String);

/// Fieldless discriminant of [`BlockKind`], used when inserting new blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Text,
    Code,
    Image,
    Video,
    Table,
    Diagram,
    Callout,
}

impl BlockType {
    pub const ALL: [BlockType; 7] = [
        BlockType::Text,
        BlockType::Code,
        BlockType::Image,
        BlockType::Video,
        BlockType::Table,
        BlockType::Diagram,
        BlockType::Callout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Code => "code",
            BlockType::Image => "image",
            BlockType::Video => "video",
            BlockType::Table => "table",
            BlockType::Diagram => "diagram",
            BlockType::Callout => "callout",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = UnknownBlockType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownBlockType(s.to_string()))
    }
}

/// Visual flavour of a callout block
///
/// Unknown values coming from stored documents fall back to [`CalloutKind::Info`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CalloutKind {
    #[default]
    Info,
    Warning,
    Danger,
    Success,
    Tip,
}

impl CalloutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalloutKind::Info => "info",
            CalloutKind::Warning => "warning",
            CalloutKind::Danger => "danger",
            CalloutKind::Success => "success",
            CalloutKind::Tip => "tip",
        }
    }

    /// Fixed icon shown next to the callout body
    pub fn icon(&self) -> &'static str {
        match self {
            CalloutKind::Info => "ℹ️",
            CalloutKind::Warning => "⚠️",
            CalloutKind::Danger => "🚨",
            CalloutKind::Success => "✅",
            CalloutKind::Tip => "💡",
        }
    }
}

impl From<String> for CalloutKind {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "warning" => CalloutKind::Warning,
            "danger" => CalloutKind::Danger,
            "success" => CalloutKind::Success,
            "tip" => CalloutKind::Tip,
            _ => CalloutKind::Info,
        }
    }
}

/// Callout metadata as stored in `metadata: { "type": … }`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalloutMetadata {
    #[serde(rename = "type", default)]
    pub kind: CalloutKind,
}

fn default_language() -> String {
    DEFAULT_CODE_LANGUAGE.to_string()
}

/// Type-specific part of a content block
///
/// Serialized internally tagged on `type` and flattened into
/// [`ContentBlock`], so each variant only carries the fields valid for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum BlockKind {
    Text,
    Code {
        #[serde(default = "default_language")]
        language: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_name: Option<String>,
    },
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt_text: Option<String>,
    },
    Video {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Table,
    Diagram,
    Callout {
        #[serde(default)]
        metadata: CalloutMetadata,
    },
}

impl BlockKind {
    /// Default fields for a freshly inserted block of `block_type`
    pub fn default_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Text => BlockKind::Text,
            BlockType::Code => BlockKind::Code {
                language: default_language(),
                file_name: None,
            },
            BlockType::Image => BlockKind::Image {
                caption: None,
                alt_text: None,
            },
            BlockType::Video => BlockKind::Video { title: None },
            BlockType::Table => BlockKind::Table,
            BlockType::Diagram => BlockKind::Diagram,
            BlockType::Callout => BlockKind::Callout {
                metadata: CalloutMetadata::default(),
            },
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Text => BlockType::Text,
            BlockKind::Code { .. } => BlockType::Code,
            BlockKind::Image { .. } => BlockType::Image,
            BlockKind::Video { .. } => BlockType::Video,
            BlockKind::Table => BlockType::Table,
            BlockKind::Diagram => BlockType::Diagram,
            BlockKind::Callout { .. } => BlockType::Callout,
        }
    }
}

/// Transient per-block preview toggle (`showPreview`), never persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreviewState {
    #[default]
    Hidden,
    Shown,
}

/// One typed unit of document content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    /// Stable identifier assigned at creation
    pub id: BlockId,

    /// Dense zero-based position inside the owning document
    #[serde(default)]
    pub(crate) order: usize,

    /// Raw payload; meaning depends on the block type
    #[serde(default)]
    pub content: String,

    /// Block type and its type-specific fields
    #[serde(flatten)]
    pub kind: BlockKind,

    #[serde(skip)]
    pub preview: PreviewState,
}

impl ContentBlock {
    /// Create an empty block of `block_type` at position `order`
    pub fn new(block_type: BlockType, order: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            order,
            content: String::new(),
            kind: BlockKind::default_for(block_type),
            preview: PreviewState::Hidden,
        }
    }

    /// Create a block with explicit content; used by migrations and tests
    pub fn with_content(block_type: BlockType, order: usize, content: impl Into<String>) -> Self {
        let mut block = Self::new(block_type, order);
        block.content = content.into();
        block
    }

    /// Position inside the owning document; only the Content Model moves it
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    /// Source language of a code block, `None` for every other type
    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Code { language, .. } => Some(language.as_str()),
            _ => None,
        }
    }

    /// Update the language of a code block; returns `false` for other types
    pub fn set_language(&mut self, value: impl Into<String>) -> bool {
        match &mut self.kind {
            BlockKind::Code { language, .. } => {
                *language = value.into();
                true
            }
            _ => false,
        }
    }

    /// Callout flavour, `None` for every other type
    pub fn callout_kind(&self) -> Option<CalloutKind> {
        match &self.kind {
            BlockKind::Callout { metadata } => Some(metadata.kind),
            _ => None,
        }
    }

    pub fn is_preview_shown(&self) -> bool {
        self.preview == PreviewState::Shown
    }

    pub fn toggle_preview(&mut self) {
        self.preview = match self.preview {
            PreviewState::Hidden => PreviewState::Shown,
            PreviewState::Shown => PreviewState::Hidden,
        };
    }
}
