//! Application state: everything the window shows and reacts to, with no
//! window attached.
//!
//! Input arrives as [`InputEvent`] values through
//! [`AppState::handle_input`]; each frame is produced by
//! [`AppState::render`], which also rebuilds the click regions. The GUI
//! shell only translates between these and the real window.

mod input;
pub mod layout;
mod render;
mod scene;

pub use input::{InputEvent, KeyAction, PointerButton};
pub use layout::Layout;
pub use scene::{Paint, Scene, Shape};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::hit::{HitResolver, RegionRegistry};
use crate::navigation::{NavigationCursor, View};
use crate::player::{AudioBackend, PlaybackController, PlaybackState};
use crate::scroll::{ContentExtent, ViewportScroll};

pub struct AppState<B: AudioBackend> {
    catalog: Catalog,
    cursor: NavigationCursor,
    scroll: ViewportScroll,
    player: PlaybackController<B>,
    registry: RegionRegistry,
    resolver: HitResolver,
    layout: Layout,
    scroll_step: f32,
    /// Last recoverable problem, shown in the player bar
    notice: Option<String>,
}

impl<B: AudioBackend> AppState<B> {
    /// Build the state and lay out the first frame's regions.
    pub fn new(catalog: Catalog, backend: B, config: &Config) -> Self {
        let mut state = Self {
            catalog,
            cursor: NavigationCursor::new(),
            scroll: ViewportScroll::new(),
            player: PlaybackController::new(backend),
            registry: RegionRegistry::new(),
            resolver: HitResolver::from_mode(config.input.hit_testing),
            layout: Layout::new(config.window.design_width, config.window.design_height),
            scroll_step: config.input.scroll_step,
            notice: None,
        };
        state.render();
        state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cursor(&self) -> &NavigationCursor {
        &self.cursor
    }

    pub fn scroll(&self) -> &ViewportScroll {
        &self.scroll
    }

    pub fn playback(&self) -> PlaybackState {
        self.player.state()
    }

    pub fn player(&self) -> &PlaybackController<B> {
        &self.player
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Show a message in the player bar until the next successful play.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Record the window-to-logical ratio reported by the renderer.
    pub fn set_window_scale(&mut self, scale: f32) {
        self.resolver.set_window_scale(scale);
    }

    fn album_grid_extent(&self) -> ContentExtent {
        let count = self.catalog.album_count();
        ContentExtent::new(
            count.div_ceil(layout::GRID_COLUMNS),
            self.layout.album_row_pitch(count),
            self.layout.album_grid_visible_height(),
        )
    }

    /// Scrollable extent of `view` for the current catalog and selection.
    fn extent(&self, view: View) -> ContentExtent {
        match view {
            View::Albums => ContentExtent::new(
                self.catalog
                    .album(self.cursor.selected_album())
                    .map_or(0, |a| a.tracks().len()),
                layout::TRACK_ROW_HEIGHT,
                self.layout.track_list_visible_height(),
            ),
            View::Songs | View::Playlists => ContentExtent::new(
                self.catalog.track_count(),
                layout::TRACK_ROW_HEIGHT,
                self.layout.list_visible_height(),
            ),
            View::Artists => ContentExtent::new(
                self.catalog.artists().len(),
                layout::ARTIST_ROW_HEIGHT,
                self.layout.list_visible_height(),
            ),
        }
    }
}
