//! Document Data Structures and Content Model
//!
//! A [`Document`] is a tutorial ("Matrix Notes") or a developer solution: a
//! bag of publishing metadata plus an ordered sequence of [`ContentBlock`]s.
//!
//! # Content Model
//!
//! The block sequence is only mutated through the primitives on `Document`
//! (`insert`, `remove`, `reorder`, `set_block_content`), which keep the
//! block `order` values exactly `0..N-1` after every call. Out-of-range
//! requests are declined without touching state.
//!
//! # Legacy bodies
//!
//! Documents authored before the block model stored their whole body as one
//! markdown string. Those still deserialize ([`DocumentBody::Legacy`]) and
//! still render; the first structural mutation migrates them one way into a
//! single text block.
//!
//! # Examples
//!
//! ```rust
//! use portfolio_core::models::{BlockType, Document, DocumentKind};
//!
//! let mut doc = Document::new(DocumentKind::Tutorial, "Signals in Angular");
//! doc.insert(BlockType::Text);
//! doc.insert(BlockType::Code);
//! doc.insert(BlockType::Image);
//! assert!(doc.reorder(2, 0));
//!
//! let orders: Vec<usize> = doc.blocks().iter().map(|b| b.order()).collect();
//! assert_eq!(orders, vec![0, 1, 2]);
//! ```

use crate::models::content_block::{BlockKind, BlockType, ContentBlock};
use crate::utils::count_words;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;

/// Identifier assigned by the persistence layer on first save
pub type DocumentId = String;

/// Validation errors for documents and portfolio records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Which micro-blog a document belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    #[default]
    Tutorial,
    Solution,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Tutorial => "tutorial",
            DocumentKind::Solution => "solution",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(ValidationError::InvalidValue {
                field: "difficulty".to_string(),
                reason: format!("'{}' is not beginner, intermediate or advanced", other),
            }),
        }
    }
}

/// Body of a document: structured blocks or a legacy markdown string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentBody {
    Blocks(Vec<ContentBlock>),
    Legacy(String),
}

impl Default for DocumentBody {
    fn default() -> Self {
        DocumentBody::Blocks(Vec::new())
    }
}

fn now() -> DateTime<Utc> {
    Utc::now()
}

/// A tutorial or developer solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Store-assigned identifier, `None` until first saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,

    #[serde(default)]
    pub kind: DocumentKind,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Unique tags in display order; mutate through `add_tag`/`remove_tag`
    #[serde(default)]
    tags: Vec<String>,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub published: bool,

    #[serde(default)]
    pub featured: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Block sequence (or legacy markdown); mutate through the Content Model
    #[serde(default)]
    content: DocumentBody,

    /// Derived reading time in minutes (`readTime` on solutions)
    #[serde(default, alias = "readTime")]
    pub reading_time: u32,

    #[serde(default = "now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "now")]
    pub updated_at: DateTime<Utc>,
}

/// Partial update consumed by `DocumentStore::update`
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<DocumentBody>,
}

impl DocumentPatch {
    pub fn is_empty(&self) -> bool {
        self == &DocumentPatch::default()
    }
}

impl Document {
    /// Create an empty, unpublished document (the "new" action)
    pub fn new(kind: DocumentKind, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            kind,
            title: title.into(),
            description: String::new(),
            tags: Vec::new(),
            category: String::new(),
            difficulty: Difficulty::default(),
            published: false,
            featured: false,
            author: None,
            content: DocumentBody::default(),
            reading_time: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a document whose body is a legacy markdown string
    pub fn from_legacy_markdown(
        kind: DocumentKind,
        title: impl Into<String>,
        markdown: impl Into<String>,
    ) -> Self {
        let mut doc = Self::new(kind, title);
        doc.content = DocumentBody::Legacy(markdown.into());
        doc
    }

    pub fn body(&self) -> &DocumentBody {
        &self.content
    }

    /// Blocks in order; empty for legacy documents
    pub fn blocks(&self) -> &[ContentBlock] {
        match &self.content {
            DocumentBody::Blocks(blocks) => blocks,
            DocumentBody::Legacy(_) => &[],
        }
    }

    pub fn block(&self, index: usize) -> Option<&ContentBlock> {
        self.blocks().get(index)
    }

    /// Edit one block's fields in place; order and id stay read-only
    pub fn block_mut(&mut self, index: usize) -> Option<BlockMut<'_>> {
        match &mut self.content {
            DocumentBody::Blocks(blocks) => blocks.get_mut(index).map(|block| BlockMut { block }),
            DocumentBody::Legacy(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.blocks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks().is_empty()
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.blocks().iter().position(|b| b.id == id)
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self.content, DocumentBody::Legacy(_))
    }

    pub fn legacy_markdown(&self) -> Option<&str> {
        match &self.content {
            DocumentBody::Legacy(markdown) => Some(markdown),
            DocumentBody::Blocks(_) => None,
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Replace the body wholesale (persistence loads, patches)
    pub fn set_body(&mut self, body: DocumentBody) {
        self.content = body;
        self.normalize();
    }

    /// Re-establish the order invariant after loading stored data
    ///
    /// Blocks are sorted by their stored `order` (stable for ties) and then
    /// renumbered densely. Tags are trimmed and deduplicated.
    pub fn normalize(&mut self) {
        if let DocumentBody::Blocks(blocks) = &mut self.content {
            blocks.sort_by_key(|b| b.order);
            renumber(blocks);
        }
        let tags = std::mem::take(&mut self.tags);
        for tag in tags {
            self.push_tag(&tag);
        }
    }

    /// One-way migration of a legacy markdown body into block form
    ///
    /// Returns `true` if a migration happened. A blank legacy body becomes an
    /// empty block list.
    pub fn migrate_legacy(&mut self) -> bool {
        let DocumentBody::Legacy(markdown) = &self.content else {
            return false;
        };
        let blocks = if markdown.trim().is_empty() {
            Vec::new()
        } else {
            vec![ContentBlock::with_content(BlockType::Text, 0, markdown.clone())]
        };
        tracing::info!(
            document_id = ?self.id,
            blocks = blocks.len(),
            "Migrated legacy markdown body to content blocks"
        );
        self.content = DocumentBody::Blocks(blocks);
        true
    }

    /// Block count the body has, or would have once migrated
    fn editable_len(&self) -> usize {
        match &self.content {
            DocumentBody::Blocks(blocks) => blocks.len(),
            DocumentBody::Legacy(markdown) if markdown.trim().is_empty() => 0,
            DocumentBody::Legacy(_) => 1,
        }
    }

    fn blocks_for_edit(&mut self) -> &mut Vec<ContentBlock> {
        self.migrate_legacy();
        match &mut self.content {
            DocumentBody::Blocks(blocks) => blocks,
            DocumentBody::Legacy(_) => unreachable!("legacy body migrated above"),
        }
    }

    //
    // CONTENT MODEL
    //

    /// Append a new block of `block_type` with type-appropriate defaults
    pub fn insert(&mut self, block_type: BlockType) -> &ContentBlock {
        let blocks = self.blocks_for_edit();
        let block = ContentBlock::new(block_type, blocks.len());
        tracing::debug!(block_id = %block.id, %block_type, order = block.order(), "Inserted block");
        blocks.push(block);
        self.touch();
        let last = self.blocks().len() - 1;
        &self.blocks()[last]
    }

    /// Delete the block at `index`; out-of-range indices are a no-op
    pub fn remove(&mut self, index: usize) -> Option<ContentBlock> {
        let len = self.editable_len();
        if index >= len {
            tracing::debug!(index, len, "Declined remove: index out of range");
            return None;
        }
        let blocks = self.blocks_for_edit();
        let removed = blocks.remove(index);
        renumber(blocks);
        self.touch();
        Some(removed)
    }

    /// Move the block at `from` to `to`, shifting the blocks in between
    ///
    /// Returns `false` (and leaves the document untouched) when either index
    /// is out of range.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.editable_len();
        if from >= len || to >= len {
            tracing::debug!(from, to, len, "Declined reorder: index out of range");
            return false;
        }
        if from != to {
            let blocks = self.blocks_for_edit();
            let block = blocks.remove(from);
            blocks.insert(to, block);
            renumber(blocks);
            self.touch();
        }
        true
    }

    /// Replace the raw content of the block at `index`
    pub fn set_block_content(&mut self, index: usize, content: impl Into<String>) -> bool {
        match self.block_mut(index) {
            Some(mut block) => {
                *block.content_mut() = content.into();
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Add a tag unless it is blank or already present (exact match)
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let added = self.push_tag(tag);
        if added {
            self.touch();
        }
        added
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        let removed = self.tags.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    fn push_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    //
    // METADATA
    //

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Recompute `reading_time` from the current body
    ///
    /// Minutes are `ceil(words / words_per_minute)`, never less than one.
    pub fn refresh_reading_time(&mut self, words_per_minute: u32) -> u32 {
        let words = self.word_count();
        let wpm = words_per_minute.max(1) as usize;
        self.reading_time = words.div_ceil(wpm).max(1) as u32;
        self.reading_time
    }

    /// Words of reading material; image and video URLs do not count
    pub fn word_count(&self) -> usize {
        match &self.content {
            DocumentBody::Legacy(markdown) => count_words(markdown),
            DocumentBody::Blocks(blocks) => blocks
                .iter()
                .map(|b| match b.block_type() {
                    BlockType::Image | BlockType::Video => 0,
                    BlockType::Table => count_words(&b.content.replace(',', " ")),
                    _ => count_words(&b.content),
                })
                .sum(),
        }
    }

    /// Plain-text excerpt for listing cards
    pub fn excerpt(&self, max_chars: usize) -> String {
        let source = if !self.description.trim().is_empty() {
            self.description.clone()
        } else {
            match &self.content {
                DocumentBody::Legacy(markdown) => markdown.clone(),
                DocumentBody::Blocks(blocks) => blocks
                    .iter()
                    .find(|b| b.block_type() == BlockType::Text)
                    .map(|b| b.content.clone())
                    .unwrap_or_default(),
            }
        };
        let plain = crate::utils::strip_markdown(&source);
        if plain.chars().count() <= max_chars {
            return plain;
        }
        let truncated: String = plain.chars().take(max_chars).collect();
        format!("{}…", truncated.trim_end())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()));
        }
        Ok(())
    }

    /// Apply a partial update; `None` fields are left untouched
    pub fn apply_patch(&mut self, patch: DocumentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(tags) = patch.tags {
            self.tags.clear();
            for tag in tags {
                self.push_tag(&tag);
            }
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(published) = patch.published {
            self.published = published;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(body) = patch.content {
            self.set_body(body);
        }
        self.touch();
    }
}

/// Write access to a block inside a [`Document`]
///
/// Reads go through `Deref`; position and identity belong to the Content
/// Model and cannot be changed here.
///
/// ```compile_fail
/// use portfolio_core::models::{BlockType, Document, DocumentKind};
///
/// let mut doc = Document::new(DocumentKind::Tutorial, "Pinned");
/// doc.insert(BlockType::Text);
/// doc.block_mut(0).unwrap().order = 7;
/// ```
#[derive(Debug)]
pub struct BlockMut<'a> {
    block: &'a mut ContentBlock,
}

impl BlockMut<'_> {
    pub fn content_mut(&mut self) -> &mut String {
        &mut self.block.content
    }

    /// Type-specific fields; the variant may be swapped to change block type
    pub fn kind_mut(&mut self) -> &mut BlockKind {
        &mut self.block.kind
    }

    pub fn set_language(&mut self, value: impl Into<String>) -> bool {
        self.block.set_language(value)
    }

    pub fn toggle_preview(&mut self) {
        self.block.toggle_preview();
    }
}

impl Deref for BlockMut<'_> {
    type Target = ContentBlock;

    fn deref(&self) -> &ContentBlock {
        self.block
    }
}

fn renumber(blocks: &mut [ContentBlock]) {
    for (i, block) in blocks.iter_mut().enumerate() {
        block.order = i;
    }
}
