//! Editing surfaces and the id → surface registry
//!
//! Every mounted block owns one surface. Commands reach a surface through its
//! block id, never through its position among the mounted surfaces, so a
//! reorder never redirects a command to a neighbouring block.

use std::collections::HashMap;

use crate::models::BlockId;
use crate::operations::commands::{FormatCommand, MarkdownToken};

/// An input surface for one block's content
///
/// Formatting primitives act on whatever surface currently holds focus, which
/// is why [`BlockEditor`](crate::operations::BlockEditor) focuses the target
/// before executing.
pub trait EditingSurface {
    fn focus(&mut self);

    fn blur(&mut self);

    fn is_focused(&self) -> bool;

    /// Run a formatting primitive; returns `false` if it was not applied
    fn execute(&mut self, command: FormatCommand) -> bool;

    /// Current content, read back into the model after each edit
    fn content(&self) -> String;

    /// Insert markdown syntax; rich surfaces don't support it
    fn insert_markdown(&mut self, _token: MarkdownToken) -> bool {
        false
    }

    /// Tab / Shift+Tab; returns `true` when the key was consumed
    fn handle_tab(&mut self, _shift: bool) -> bool {
        false
    }
}

/// Surfaces keyed by the id of the block they edit
#[derive(Debug)]
pub struct SurfaceRegistry<S> {
    surfaces: HashMap<BlockId, S>,
}

impl<S> Default for SurfaceRegistry<S> {
    fn default() -> Self {
        Self {
            surfaces: HashMap::new(),
        }
    }
}

impl<S: EditingSurface> SurfaceRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the surface for a block, replacing any previous one
    pub fn mount(&mut self, id: impl Into<BlockId>, surface: S) -> Option<S> {
        self.surfaces.insert(id.into(), surface)
    }

    pub fn unmount(&mut self, id: &str) -> Option<S> {
        self.surfaces.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&S> {
        self.surfaces.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut S> {
        self.surfaces.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.surfaces.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Focus `id` and blur every other surface
    pub fn focus_only(&mut self, id: &str) -> bool {
        if !self.surfaces.contains_key(id) {
            return false;
        }
        for (surface_id, surface) in self.surfaces.iter_mut() {
            if surface_id == id {
                surface.focus();
            } else if surface.is_focused() {
                surface.blur();
            }
        }
        true
    }
}
