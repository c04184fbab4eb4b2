use crate::hit::{Action, Rect};
use crate::navigation::View;
use crate::player::{AudioBackend, Progress};

use super::AppState;
use super::layout::{
    ARTIST_BOX_HEIGHT, ARTIST_ROW_HEIGHT, CARD_PADDING, Layout, PLAY_RADIUS, PROGRESS_HEIGHT,
    ROW_BOX_HEIGHT, SIDEBAR_WIDTH, THUMB_SIZE, TRACK_ROW_HEIGHT,
};
use super::scene::{Paint, Scene};

const TITLE_TEXT: f32 = 24.0;
const BODY_TEXT: f32 = 18.0;
const SMALL_TEXT: f32 = 16.0;
const ACCENT_WIDTH: f32 = 3.0;
const TIME_TEXT: f32 = 12.0;

impl<B: AudioBackend> AppState<B> {
    /// Draw one frame and rebuild the click regions to match it.
    pub fn render(&mut self) -> Scene {
        for view in View::SIDEBAR {
            let extent = self.extent(view);
            self.scroll.clamp(view, extent);
        }
        let grid = self.album_grid_extent();
        self.scroll.scroll_album_grid(0.0, grid);

        self.registry.begin_frame();
        let layout = self.layout;
        let mut scene = Scene::new(layout.width, layout.height);
        scene.rect(Rect::new(0.0, 0.0, layout.width, layout.height), Paint::Background);

        self.draw_sidebar(&mut scene);
        match self.cursor.active_view() {
            View::Albums => {
                self.draw_album_grid(&mut scene);
                self.draw_track_list(&mut scene);
            }
            // No playlist model: the Playlists view lists every song
            View::Songs | View::Playlists => self.draw_songs(&mut scene),
            View::Artists => self.draw_artists(&mut scene),
        }
        self.draw_player_bar(&mut scene);
        scene
    }

    fn draw_sidebar(&mut self, scene: &mut Scene) {
        let layout = self.layout;
        scene.rect(Rect::new(0.0, 0.0, SIDEBAR_WIDTH, layout.height), Paint::Sidebar);
        scene.text(20.0, 30.0, SMALL_TEXT, "LIBRARY", Paint::TextSecondary);

        let active = self.cursor.active_view();
        for (i, view) in View::SIDEBAR.into_iter().enumerate() {
            let item = layout.menu_item(i);
            let text = if view == active {
                scene.rect(item, Paint::Card);
                scene.rect(Rect::new(item.x, item.y, ACCENT_WIDTH, item.height), Paint::Accent);
                Paint::TextPrimary
            } else {
                Paint::TextSecondary
            };
            scene.text(item.x + 10.0, item.y + 5.0, 17.0, view.label(), text);
            self.registry
                .register(Action::ShowView(view), item.x, item.y, item.width, item.height);
        }
    }

    fn draw_album_grid(&mut self, scene: &mut Scene) {
        let count = self.catalog.album_count();
        let scroll = self.scroll.album_grid_offset();
        let visible = self.layout.album_grid_visible_height();
        for index in 0..count {
            let mut tile = self.layout.album_tile(index, count);
            tile.y -= scroll;
            if !self.layout.row_visible(tile.y, tile.height, visible) {
                continue;
            }
            scene.rect(
                Rect::new(
                    tile.x - CARD_PADDING,
                    tile.y - CARD_PADDING,
                    tile.width + CARD_PADDING * 2.0,
                    tile.height + CARD_PADDING * 2.0,
                ),
                Paint::Card,
            );
            scene.rect(tile, Paint::Artwork(index));
            if self.cursor.album_confirmed() && index == self.cursor.selected_album() {
                scene.rect(
                    Rect::new(tile.x, tile.y + tile.height - ACCENT_WIDTH, tile.width, ACCENT_WIDTH),
                    Paint::Accent,
                );
            }
            self.registry
                .register(Action::SelectAlbum(index), tile.x, tile.y, tile.width, tile.height);
        }
    }

    fn draw_track_list(&mut self, scene: &mut Scene) {
        let layout = self.layout;
        let album_index = self.cursor.selected_album();
        let Some(album) = self.catalog.album(album_index) else {
            return;
        };
        let scroll = self.scroll.offset(View::Albums);
        let visible = layout.track_list_visible_height();
        let x = layout.track_list_x();

        for (index, track) in album.tracks().iter().enumerate() {
            let y = Layout::row_text_y(index, TRACK_ROW_HEIGHT, scroll);
            if !layout.row_visible(y, ROW_BOX_HEIGHT, visible) {
                continue;
            }
            let row = layout.track_row(y);
            let selected = index == self.cursor.selected_track();
            draw_row(scene, row, selected);
            scene.text(x, y, SMALL_TEXT, (index + 1).to_string(), Paint::TextSecondary);
            scene.text(x + 30.0, y, BODY_TEXT, track.name(), text_paint(selected));

            if self.cursor.album_confirmed() {
                self.registry.register(
                    Action::PlayTrack {
                        album: album_index,
                        track: index,
                    },
                    row.x,
                    row.y,
                    row.width,
                    row.height,
                );
            }
        }
    }

    fn draw_songs(&mut self, scene: &mut Scene) {
        let layout = self.layout;
        let scroll = self.scroll.offset(self.cursor.active_view());
        let visible = layout.list_visible_height();
        let x = layout.list_x();
        let position = self.cursor.position();

        for (index, song) in self.catalog.songs().enumerate() {
            let y = Layout::row_text_y(index, TRACK_ROW_HEIGHT, scroll);
            if !layout.row_visible(y, ROW_BOX_HEIGHT, visible) {
                continue;
            }
            let row = layout.list_row(y, ROW_BOX_HEIGHT);
            let selected = (song.album_index, song.track_index) == position;
            draw_row(scene, row, selected);
            scene.text(x, y, SMALL_TEXT, (index + 1).to_string(), Paint::TextSecondary);
            scene.text(x + 35.0, y, BODY_TEXT, song.track.name(), text_paint(selected));
            scene.text(x + 35.0, y + 20.0, SMALL_TEXT, song.album.artist(), Paint::TextSecondary);

            self.registry.register(
                Action::PlayTrack {
                    album: song.album_index,
                    track: song.track_index,
                },
                row.x,
                row.y,
                row.width,
                row.height,
            );
        }
    }

    fn draw_artists(&self, scene: &mut Scene) {
        let layout = self.layout;
        let scroll = self.scroll.offset(View::Artists);
        let visible = layout.list_visible_height();
        let x = layout.list_x();

        for (index, artist) in self.catalog.artists().iter().enumerate() {
            let y = Layout::row_text_y(index, ARTIST_ROW_HEIGHT, scroll);
            if !layout.row_visible(y, ARTIST_BOX_HEIGHT, visible) {
                continue;
            }
            scene.rect(layout.list_row(y, ARTIST_BOX_HEIGHT), Paint::Card);
            scene.text(x, y, TITLE_TEXT, artist.name, Paint::TextPrimary);
            let count = artist.album_count();
            let label = format!("{} album{}", count, if count == 1 { "" } else { "s" });
            scene.text(x, y + 28.0, SMALL_TEXT, label, Paint::TextSecondary);
        }
    }

    fn draw_player_bar(&mut self, scene: &mut Scene) {
        let layout = self.layout;
        let bar = layout.player_bar();
        scene.rect(bar, Paint::PlayerBar);

        if self.cursor.album_confirmed() {
            let (album, track) = self.cursor.position();
            if let (Some(a), Some(t)) = (self.catalog.album(album), self.catalog.track(album, track)) {
                let (info_x, info_y) = (25.0, bar.y + 12.0);
                scene.rect(
                    Rect::new(info_x, info_y, THUMB_SIZE, THUMB_SIZE),
                    Paint::Artwork(album),
                );
                let text_x = info_x + THUMB_SIZE + 15.0;
                scene.text(text_x, info_y + 8.0, 15.0, t.name(), Paint::TextPrimary);
                scene.text(text_x, info_y + 30.0, 15.0, a.artist(), Paint::TextSecondary);
            }
        }

        let (cx, cy) = layout.transport_center();
        let playing = self.player.is_playing();

        let prev = layout.previous_button();
        let (px, py) = (prev.x + prev.width / 2.0, prev.y + prev.height / 2.0);
        scene.rect(Rect::new(px - 8.0, py - 8.0, 2.0, 16.0), Paint::TextPrimary);
        scene.triangle([(px - 6.0, py), (px + 5.0, py - 8.0), (px + 5.0, py + 8.0)], Paint::TextPrimary);

        scene.circle(cx, cy, PLAY_RADIUS, if playing { Paint::Accent } else { Paint::TextPrimary });
        if playing {
            scene.rect(Rect::new(cx - 5.5, cy - 5.0, 2.5, 10.0), Paint::TextPrimary);
            scene.rect(Rect::new(cx + 3.0, cy - 5.0, 2.5, 10.0), Paint::TextPrimary);
        } else {
            scene.triangle([(cx - 3.0, cy - 7.0), (cx - 3.0, cy + 7.0), (cx + 8.0, cy)], Paint::Background);
        }

        let next = layout.next_button();
        let (nx, ny) = (next.x + next.width / 2.0, next.y + next.height / 2.0);
        scene.triangle([(nx - 5.0, ny - 8.0), (nx - 5.0, ny + 8.0), (nx + 6.0, ny)], Paint::TextPrimary);
        scene.rect(Rect::new(nx + 6.0, ny - 8.0, 2.0, 16.0), Paint::TextPrimary);

        if let Some(notice) = &self.notice {
            scene.text(cx + 90.0, cy - 7.0, 14.0, notice.as_str(), Paint::Accent);
        }

        let seek = layout.progress_bar();
        draw_progress(scene, seek, self.player.progress().unwrap_or_default());

        for (action, rect) in [
            (Action::PlayPause, layout.play_button()),
            (Action::Previous, prev),
            (Action::Next, next),
            (Action::Seek, seek),
        ] {
            self.registry.register(action, rect.x, rect.y, rect.width, rect.height);
        }
    }
}

/// Elapsed time, the filled line and the total time.
fn draw_progress(scene: &mut Scene, band: Rect, progress: Progress) {
    let line_y = band.y + (band.height - PROGRESS_HEIGHT) / 2.0;
    scene.rect(Rect::new(band.x, line_y, band.width, PROGRESS_HEIGHT), Paint::Card);
    let filled = band.width * progress.fraction();
    if filled > 0.0 {
        scene.rect(Rect::new(band.x, line_y, filled, PROGRESS_HEIGHT), Paint::Accent);
    }

    let text_y = band.y - 1.0;
    scene.text(band.x - 45.0, text_y, TIME_TEXT, progress.position_str(), Paint::TextSecondary);
    scene.text(
        band.x + band.width + 10.0,
        text_y,
        TIME_TEXT,
        progress.duration_str(),
        Paint::TextSecondary,
    );
}

fn draw_row(scene: &mut Scene, row: Rect, selected: bool) {
    scene.rect(row, Paint::Card);
    if selected {
        scene.rect(Rect::new(row.x, row.y, ACCENT_WIDTH, row.height), Paint::Accent);
    }
}

fn text_paint(selected: bool) -> Paint {
    if selected {
        Paint::TextPrimary
    } else {
        Paint::TextSecondary
    }
}
