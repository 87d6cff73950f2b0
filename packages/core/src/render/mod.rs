//! Renderer
//!
//! Pure functions from content to sanitized HTML. Nothing here holds state,
//! reads the clock or fails: rendering the same block twice yields the same
//! bytes, and malformed content degrades to a safe fallback.
//!
//! - [`render_block`] - dispatch on block type for the live preview
//! - [`render_markdown`] - the constrained markdown subset used by text,
//!   callout and diagram blocks
//! - [`render_document`] / [`render_legacy_markdown`] - whole documents in
//!   block or legacy form
//! - [`Highlighter`] - display-time syntax highlighting seam

mod block;
mod document;
mod escape;
mod highlight;
mod markdown;
mod table;
mod video;

pub use block::{render_block, render_block_with, render_code, IMAGE_ALT_FALLBACK};
pub use document::{render_document, render_document_with, render_legacy_markdown};
pub use escape::{escape_html, is_safe_url, push_escaped};
pub use highlight::{Highlighter, PlainHighlighter};
pub use markdown::{render_inline, render_markdown};
pub use table::render_table;
pub use video::{render_video, youtube_video_id, VIDEO_LINK_FALLBACK};
