//! Drag-and-drop gesture state

/// Tracks one drag gesture from `dragstart` to `drop`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    dragging: Option<usize>,
    over: Option<usize>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, index: usize) {
        self.dragging = Some(index);
        self.over = None;
    }

    /// `dragover` on the block at `index`
    pub fn over(&mut self, index: usize) {
        if self.dragging.is_some() {
            self.over = Some(index);
        }
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    pub fn hovered(&self) -> Option<usize> {
        self.over
    }

    /// Finish the gesture on `index`, yielding `(from, to)` for a real move
    pub fn drop_on(&mut self, index: usize) -> Option<(usize, usize)> {
        let from = self.dragging.take();
        self.over = None;
        from.filter(|&from| from != index).map(|from| (from, index))
    }

    pub fn cancel(&mut self) {
        self.dragging = None;
        self.over = None;
    }
}
