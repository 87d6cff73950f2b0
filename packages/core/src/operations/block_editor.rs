//! Block Editor
//!
//! Mediates between input events on block surfaces and Content Model
//! mutations on a [`Document`]. Commands always name their target block; the
//! editor focuses that block's surface, yields once so the focus change is
//! observed, executes, and copies the surface content back into the model.

use std::time::Duration;

use crate::config::PortfolioConfig;
use crate::models::{BlockId, ContentBlock, Document};
use crate::operations::commands::{FormatCommand, MarkdownToken};
use crate::operations::drag::DragState;
use crate::operations::focus::ActiveBlockTracker;
use crate::operations::surface::{EditingSurface, SurfaceRegistry};

#[derive(Debug)]
pub struct BlockEditor<S> {
    surfaces: SurfaceRegistry<S>,
    tracker: ActiveBlockTracker,
    drag: DragState,
}

impl<S: EditingSurface> Default for BlockEditor<S> {
    fn default() -> Self {
        Self {
            surfaces: SurfaceRegistry::new(),
            tracker: ActiveBlockTracker::default(),
            drag: DragState::new(),
        }
    }
}

impl<S: EditingSurface> BlockEditor<S> {
    pub fn new(blur_grace: Duration) -> Self {
        Self {
            tracker: ActiveBlockTracker::new(blur_grace),
            ..Self::default()
        }
    }

    pub fn from_config(config: &PortfolioConfig) -> Self {
        Self::new(config.blur_grace_period())
    }

    //
    // SURFACES
    //

    pub fn mount(&mut self, id: impl Into<BlockId>, surface: S) {
        self.surfaces.mount(id, surface);
    }

    /// Mount a surface for every block of `document`
    pub fn mount_document<F>(&mut self, document: &Document, mut make_surface: F)
    where
        F: FnMut(&ContentBlock) -> S,
    {
        for block in document.blocks() {
            self.surfaces.mount(block.id.clone(), make_surface(block));
        }
    }

    pub fn unmount(&mut self, id: &str) -> Option<S> {
        self.tracker.forget(id);
        self.surfaces.unmount(id)
    }

    pub fn surface(&self, id: &str) -> Option<&S> {
        self.surfaces.get(id)
    }

    pub fn surface_mut(&mut self, id: &str) -> Option<&mut S> {
        self.surfaces.get_mut(id)
    }

    //
    // FOCUS
    //

    /// Focus, click or keydown on a block's surface
    pub fn on_focus(&mut self, id: impl Into<BlockId>) {
        self.tracker.activate(id);
    }

    pub fn on_blur(&mut self) {
        self.tracker.blur();
    }

    pub fn active_block_id(&self) -> Option<&str> {
        self.tracker.active()
    }

    /// Current position of the active block, resolved through its id
    pub fn active_block_index(&self, document: &Document) -> Option<usize> {
        self.tracker.active().and_then(|id| document.position_of(id))
    }

    //
    // COMMANDS
    //

    /// Apply a formatting command to the block at `index`
    ///
    /// Returns `false` when the index is out of range, the block has no
    /// mounted surface, or the surface declined the command.
    pub async fn apply_command(
        &mut self,
        document: &mut Document,
        command: FormatCommand,
        index: usize,
    ) -> bool {
        let Some(id) = document.block(index).map(|b| b.id.clone()) else {
            tracing::debug!(%command, index, "Declined command: index out of range");
            return false;
        };
        if !self.surfaces.focus_only(&id) {
            tracing::debug!(%command, block_id = %id, "Declined command: no mounted surface");
            return false;
        }
        self.tracker.activate(id.clone());

        // Focus must be observed before the primitive runs
        tokio::task::yield_now().await;

        let Some(surface) = self.surfaces.get_mut(&id) else {
            return false;
        };
        if !surface.execute(command) {
            tracing::debug!(%command, block_id = %id, "Surface declined command");
            return false;
        }
        let content = surface.content();
        document.set_block_content(index, content)
    }

    /// Toolbar path: apply to whichever block is active
    pub async fn apply_command_to_active(
        &mut self,
        document: &mut Document,
        command: FormatCommand,
    ) -> bool {
        match self.active_block_index(document) {
            Some(index) => self.apply_command(document, command, index).await,
            None => {
                tracing::debug!(%command, "Declined command: no active block");
                false
            }
        }
    }

    /// Apply a command given by name; unknown names are declined
    pub async fn apply_named_command(
        &mut self,
        document: &mut Document,
        name: &str,
        index: usize,
    ) -> bool {
        match name.parse::<FormatCommand>() {
            Ok(command) => self.apply_command(document, command, index).await,
            Err(err) => {
                tracing::debug!(error = %err, "Declined command");
                false
            }
        }
    }

    /// Insert markdown syntax into the plain-text surface of block `index`
    pub fn insert_markdown_token(
        &mut self,
        document: &mut Document,
        token: MarkdownToken,
        index: usize,
    ) -> bool {
        let Some(id) = document.block(index).map(|b| b.id.clone()) else {
            return false;
        };
        let Some(surface) = self.surfaces.get_mut(&id) else {
            return false;
        };
        if !surface.insert_markdown(token) {
            tracing::debug!(?token, block_id = %id, "Surface does not accept markdown tokens");
            return false;
        }
        let content = surface.content();
        document.set_block_content(index, content)
    }

    /// Tab or Shift+Tab inside block `index`
    pub fn handle_tab(&mut self, document: &mut Document, index: usize, shift: bool) -> bool {
        let Some(id) = document.block(index).map(|b| b.id.clone()) else {
            return false;
        };
        let Some(surface) = self.surfaces.get_mut(&id) else {
            return false;
        };
        if !surface.handle_tab(shift) {
            return false;
        }
        let content = surface.content();
        document.set_block_content(index, content)
    }

    /// `input` event: copy the surface content of block `index` into the model
    pub fn sync_from_surface(&mut self, document: &mut Document, index: usize) -> bool {
        let content = document
            .block(index)
            .and_then(|b| self.surfaces.get(&b.id))
            .map(|s| s.content());
        match content {
            Some(content) => document.set_block_content(index, content),
            None => false,
        }
    }

    /// Remove block `index` and tear down its surface
    pub fn remove_block(&mut self, document: &mut Document, index: usize) -> Option<ContentBlock> {
        let removed = document.remove(index)?;
        self.unmount(&removed.id);
        Some(removed)
    }

    //
    // DRAG AND DROP
    //

    pub fn drag_start(&mut self, index: usize) {
        self.drag.start(index);
    }

    pub fn drag_over(&mut self, index: usize) {
        self.drag.over(index);
    }

    pub fn drag_cancel(&mut self) {
        self.drag.cancel();
    }

    /// Drop on block `index`, delegating the move to [`Document::reorder`]
    pub fn drop_on(&mut self, document: &mut Document, index: usize) -> bool {
        match self.drag.drop_on(index) {
            Some((from, to)) => document.reorder(from, to),
            None => false,
        }
    }
}
