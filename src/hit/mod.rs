//! Click targets: rectangles registered while drawing, resolved on input.
//!
//! Regions live in logical (design-size) coordinates and are rebuilt on
//! every frame. Resolution checks groups in a fixed priority order
//! (transport, sidebar, content) regardless of drawing order.

mod registry;
mod resolver;

pub use registry::{CANDIDATE_SCALES, Hit, Region, RegionRegistry};
pub use resolver::{HitResolver, HitTesting, ScaleStrategy};

use crate::navigation::View;

/// Axis-aligned rectangle, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn scaled(&self, scale: f32) -> Self {
        Self::new(
            self.x * scale,
            self.y * scale,
            self.width * scale,
            self.height * scale,
        )
    }
}

/// What a click on a region does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PlayPause,
    Previous,
    Next,
    /// Jump within the playing track; the click's x picks the position
    Seek,
    ShowView(View),
    SelectAlbum(usize),
    PlayTrack { album: usize, track: usize },
}

impl Action {
    pub fn group(&self) -> RegionGroup {
        match self {
            Action::PlayPause | Action::Previous | Action::Next | Action::Seek => {
                RegionGroup::Transport
            }
            Action::ShowView(_) => RegionGroup::Sidebar,
            Action::SelectAlbum(_) | Action::PlayTrack { .. } => RegionGroup::Content,
        }
    }
}

/// Resolution priority classes, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionGroup {
    Transport,
    Sidebar,
    Content,
}

impl RegionGroup {
    pub const PRIORITY: [RegionGroup; 3] =
        [RegionGroup::Transport, RegionGroup::Sidebar, RegionGroup::Content];
}
