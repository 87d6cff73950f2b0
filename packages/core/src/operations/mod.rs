//! Block Editor Operations
//!
//! Routing of user input to Content Model mutations:
//!
//! - [`BlockEditor`] - focus-then-act command routing, markdown tokens, tab handling, drag-and-drop
//! - [`EditingSurface`] / [`SurfaceRegistry`] - per-block input surfaces keyed by block id
//! - [`ActiveBlockTracker`] - active block with a blur grace period
//! - [`TextArea`] - plain-text markdown surface with a character-offset [`Selection`]

mod block_editor;
mod commands;
mod drag;
mod focus;
mod surface;
mod text_area;

pub use block_editor::BlockEditor;
pub use commands::{FormatCommand, HeadingLevel, MarkdownToken, UnknownCommand};
pub use drag::DragState;
pub use focus::{ActiveBlockTracker, DEFAULT_BLUR_GRACE};
pub use surface::{EditingSurface, SurfaceRegistry};
pub use text_area::{Selection, TextArea, INDENT};
