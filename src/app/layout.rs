//! Logical geometry, computed from the design size.

use crate::hit::Rect;

pub const SIDEBAR_WIDTH: f32 = 200.0;
pub const PLAYER_BAR_HEIGHT: f32 = 75.0;
/// Top of every content list
pub const CONTENT_TOP: f32 = 40.0;

pub const MENU_X: f32 = 15.0;
pub const MENU_TOP: f32 = 65.0;
pub const MENU_WIDTH: f32 = 170.0;
pub const MENU_HEIGHT: f32 = 30.0;
pub const MENU_SPACING: f32 = 35.0;

pub const PLAY_RADIUS: f32 = 18.0;
pub const SKIP_OFFSET: f32 = 50.0;
pub const SKIP_WIDTH: f32 = 30.0;
pub const SKIP_HEIGHT: f32 = 20.0;

pub const PROGRESS_WIDTH: f32 = 360.0;
pub const PROGRESS_HEIGHT: f32 = 4.0;
/// Clickable band around the progress line
pub const PROGRESS_HIT_HEIGHT: f32 = 12.0;
pub const PROGRESS_TOP: f32 = 6.0;

pub const GRID_COLUMNS: usize = 2;
pub const GRID_MARGIN: f32 = 15.0;
pub const CARD_PADDING: f32 = 8.0;
/// Tiles never shrink below this; larger catalogs scroll the grid instead
pub const MIN_TILE_SIZE: f32 = 80.0;

pub const TRACK_ROW_HEIGHT: f32 = 48.0;
pub const ARTIST_ROW_HEIGHT: f32 = 60.0;
pub const ROW_BOX_HEIGHT: f32 = 38.0;
pub const ARTIST_BOX_HEIGHT: f32 = 45.0;
pub const ROW_PADDING: f32 = 12.0;
/// Row boxes start this far above their text line
pub const ROW_LEAD: f32 = 8.0;

pub const THUMB_SIZE: f32 = 48.0;

/// Geometry for one design size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Height available to the Songs and Artists lists.
    pub fn list_visible_height(&self) -> f32 {
        self.height - CONTENT_TOP - PLAYER_BAR_HEIGHT - 20.0
    }

    /// Height the album track list scrolls against.
    pub fn track_list_visible_height(&self) -> f32 {
        self.height - 150.0
    }

    pub fn menu_item(&self, index: usize) -> Rect {
        Rect::new(MENU_X, MENU_TOP + index as f32 * MENU_SPACING, MENU_WIDTH, MENU_HEIGHT)
    }

    pub fn player_bar(&self) -> Rect {
        Rect::new(0.0, self.height - PLAYER_BAR_HEIGHT, self.width, PLAYER_BAR_HEIGHT)
    }

    /// Centre of the play/pause button.
    pub fn transport_center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height - PLAYER_BAR_HEIGHT / 2.0)
    }

    pub fn play_button(&self) -> Rect {
        let (cx, cy) = self.transport_center();
        Rect::new(cx - PLAY_RADIUS, cy - PLAY_RADIUS, PLAY_RADIUS * 2.0, PLAY_RADIUS * 2.0)
    }

    pub fn previous_button(&self) -> Rect {
        self.skip_button(-SKIP_OFFSET)
    }

    pub fn next_button(&self) -> Rect {
        self.skip_button(SKIP_OFFSET)
    }

    /// Seek band above the transport buttons.
    pub fn progress_bar(&self) -> Rect {
        let (cx, _) = self.transport_center();
        Rect::new(
            cx - PROGRESS_WIDTH / 2.0,
            self.player_bar().y + PROGRESS_TOP,
            PROGRESS_WIDTH,
            PROGRESS_HIT_HEIGHT,
        )
    }

    /// Fraction of the track a logical x on the progress bar stands for.
    pub fn progress_fraction_at(&self, x: f32) -> f32 {
        let bar = self.progress_bar();
        ((x - bar.x) / bar.width).clamp(0.0, 1.0)
    }

    fn skip_button(&self, offset: f32) -> Rect {
        let (cx, cy) = self.transport_center();
        Rect::new(
            cx + offset - SKIP_WIDTH / 2.0,
            cy - SKIP_HEIGHT / 2.0,
            SKIP_WIDTH,
            SKIP_HEIGHT,
        )
    }

    /// Side of a square album tile for a grid of `count` albums.
    pub fn album_tile_size(&self, count: usize) -> f32 {
        let albums_width = (self.width - SIDEBAR_WIDTH) / 2.0 - 50.0;
        let available = self.height - 150.0;
        let rows = count.div_ceil(GRID_COLUMNS).max(1) as f32;
        (albums_width / 2.1)
            .min(available / (rows * 1.1))
            .floor()
            .max(MIN_TILE_SIZE)
    }

    /// Vertical distance between the tops of two grid rows.
    pub fn album_row_pitch(&self, count: usize) -> f32 {
        self.album_tile_size(count) + GRID_MARGIN
    }

    /// Height the album grid scrolls against.
    pub fn album_grid_visible_height(&self) -> f32 {
        self.height - CONTENT_TOP - PLAYER_BAR_HEIGHT - GRID_MARGIN
    }

    pub fn album_tile(&self, index: usize, count: usize) -> Rect {
        let size = self.album_tile_size(count);
        let col = (index % GRID_COLUMNS) as f32;
        let row = (index / GRID_COLUMNS) as f32;
        Rect::new(
            SIDEBAR_WIDTH + 30.0 + col * (size + GRID_MARGIN),
            CONTENT_TOP + row * self.album_row_pitch(count),
            size,
            size,
        )
    }

    /// Left edge of the right-hand column; wheel events right of it
    /// scroll the track list.
    pub fn track_column_x(&self) -> f32 {
        SIDEBAR_WIDTH + (self.width - SIDEBAR_WIDTH) / 2.0
    }

    /// Text x of the track list.
    pub fn track_list_x(&self) -> f32 {
        self.track_column_x() + 20.0
    }

    pub fn track_list_width(&self) -> f32 {
        (self.width - SIDEBAR_WIDTH) / 2.0 - 60.0
    }

    /// Text x of the Songs and Artists lists.
    pub fn list_x(&self) -> f32 {
        SIDEBAR_WIDTH + 40.0
    }

    pub fn list_row_width(&self) -> f32 {
        self.width - SIDEBAR_WIDTH - 80.0
    }

    /// Text baseline-top of row `index` after scrolling.
    pub fn row_text_y(index: usize, row_height: f32, scroll: f32) -> f32 {
        CONTENT_TOP + index as f32 * row_height - scroll
    }

    /// Whether a row whose text starts at `text_y` is inside the list area.
    pub fn row_visible(&self, text_y: f32, box_height: f32, visible_height: f32) -> bool {
        text_y + box_height >= CONTENT_TOP && text_y <= CONTENT_TOP + visible_height
    }

    pub fn track_row(&self, text_y: f32) -> Rect {
        Rect::new(
            self.track_list_x() - ROW_PADDING,
            text_y - ROW_LEAD,
            self.track_list_width() + ROW_PADDING * 2.0,
            ROW_BOX_HEIGHT,
        )
    }

    pub fn list_row(&self, text_y: f32, box_height: f32) -> Rect {
        Rect::new(
            self.list_x() - ROW_PADDING,
            text_y - ROW_LEAD,
            self.list_row_width(),
            box_height,
        )
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(1200.0, 900.0)
    }
}
