//! Per-view vertical scroll offsets.

use crate::navigation::View;

/// Size of a view's scrollable content relative to its viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentExtent {
    pub item_count: usize,
    pub row_height: f32,
    pub visible_height: f32,
}

impl ContentExtent {
    pub fn new(item_count: usize, row_height: f32, visible_height: f32) -> Self {
        Self {
            item_count,
            row_height,
            visible_height,
        }
    }

    /// Furthest the content may scroll, never negative.
    pub fn max_scroll(&self) -> f32 {
        (self.item_count as f32 * self.row_height - self.visible_height).max(0.0)
    }
}

/// One offset per view, each kept within `[0, max_scroll]`.
///
/// The Albums view has a second pane, the album grid, with an offset of
/// its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewportScroll {
    offsets: [f32; 4],
    album_grid: f32,
}

impl ViewportScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self, view: View) -> f32 {
        self.offsets[view.index()]
    }

    pub fn album_grid_offset(&self) -> f32 {
        self.album_grid
    }

    /// Scroll by `delta` (positive scrolls down) and return the new offset.
    pub fn scroll_by(&mut self, view: View, delta: f32, extent: ContentExtent) -> f32 {
        step(&mut self.offsets[view.index()], delta, extent)
    }

    /// Scroll the album grid, with the same clamping as [`Self::scroll_by`].
    pub fn scroll_album_grid(&mut self, delta: f32, extent: ContentExtent) -> f32 {
        step(&mut self.album_grid, delta, extent)
    }

    /// Re-clamp after the content extent changed.
    pub fn clamp(&mut self, view: View, extent: ContentExtent) -> f32 {
        self.scroll_by(view, 0.0, extent)
    }

    pub fn reset_all(&mut self) {
        self.offsets = [0.0; 4];
        self.album_grid = 0.0;
    }
}

fn step(slot: &mut f32, delta: f32, extent: ContentExtent) -> f32 {
    let next = *slot + delta;
    *slot = if next.is_finite() {
        next.clamp(0.0, extent.max_scroll())
    } else {
        0.0
    };
    *slot
}
