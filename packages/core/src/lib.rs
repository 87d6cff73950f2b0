//! Portfolio CMS Core
//!
//! This crate provides the content model, block editor and HTML renderer for
//! the portfolio site's tutorials and developer solutions.
//!
//! # Architecture
//!
//! - **Typed blocks**: a document is an ordered list of content blocks, each a
//!   closed sum type keyed by `type` (text, code, image, video, table, diagram,
//!   callout)
//! - **Dense ordering**: every Content Model mutation leaves block orders at
//!   exactly `0..N-1`
//! - **Id-keyed surfaces**: editor commands reach block surfaces by block id,
//!   never by position
//! - **Total renderer**: rendering never fails and never passes raw user input
//!   through unescaped
//!
//! # Modules
//!
//! - [`models`] - Data structures (ContentBlock, Document, ClipboardSnippet, portfolio records)
//! - [`operations`] - Block Editor (command routing, markdown tokens, focus, drag-and-drop)
//! - [`render`] - HTML rendering for the live preview and published pages
//! - [`db`] - Persistence collaborator trait and store implementations
//! - [`services`] - Editing sessions, catalogue queries, clipboard, admin gate
//! - [`utils`] - Markdown stripping and code language detection
//! - [`config`] - Application configuration

pub mod config;
pub mod db;
pub mod models;
pub mod operations;
pub mod render;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::{ConfigError, PortfolioConfig};
pub use models::*;
pub use operations::{BlockEditor, EditingSurface, FormatCommand, MarkdownToken, TextArea};
pub use render::{render_block, render_document};
pub use services::*;
