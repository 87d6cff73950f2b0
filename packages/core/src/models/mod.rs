//! Data Models
//!
//! - [`ContentBlock`] / [`BlockKind`] - one typed unit of document content
//! - [`Document`] - tutorial or solution, owning its ordered blocks (the Content Model)
//! - [`ClipboardSnippet`] - throwaway online-clipboard paste
//! - Portfolio records ([`PortfolioData`], [`Project`], [`Skill`], ...)

mod clipboard;
mod content_block;
mod document;
mod portfolio;

#[cfg(test)]
mod document_test;

pub use clipboard::{ClipboardSnippet, SHARE_CODE_LEN};
pub use content_block::{
    BlockId, BlockKind, BlockType, CalloutKind, CalloutMetadata, ContentBlock, PreviewState,
    UnknownBlockType, DEFAULT_CODE_LANGUAGE,
};
pub use document::{
    BlockMut, Difficulty, Document, DocumentBody, DocumentId, DocumentKind, DocumentPatch, ValidationError,
};
pub use portfolio::{Experience, PortfolioData, Profile, Project, Skill};
