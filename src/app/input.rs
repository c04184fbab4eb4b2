use crate::hit::{Action, Hit};
use crate::navigation::View;
use crate::player::{AudioBackend, Completion, HandleId, PlayerError};

use super::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    Other,
}

/// Logical key commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePlayPause,
    Previous,
    Next,
}

/// Everything the core reacts to. Pointer coordinates are in window pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32, button: PointerButton },
    /// `delta` in wheel notches, positive moves towards the end of the list
    Wheel { x: f32, y: f32, delta: f32 },
    Key(KeyAction),
    /// The track behind this handle played to its end
    PlaybackCompleted(HandleId),
    /// The track behind this handle failed while playing
    PlaybackFailed { id: HandleId, reason: String },
}

impl<B: AudioBackend> AppState<B> {
    /// Apply one input event.
    ///
    /// Playback failures are returned and also kept as the current notice;
    /// browsing state is updated regardless.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), PlayerError> {
        let result = match event {
            InputEvent::PointerDown { x, y, button } => {
                if button != PointerButton::Left {
                    return Ok(());
                }
                match self.resolver.resolve(&self.registry, x, y) {
                    Some(Hit {
                        action: Action::Seek,
                        scale,
                    }) => {
                        let fraction = self.layout.progress_fraction_at(x / scale);
                        self.player.seek(fraction)
                    }
                    Some(hit) => self.dispatch(hit.action),
                    None => Ok(()),
                }
            }
            InputEvent::Wheel { x, y, delta } => {
                self.wheel(x, y, delta);
                Ok(())
            }
            InputEvent::Key(key) => self.dispatch(match key {
                KeyAction::TogglePlayPause => Action::PlayPause,
                KeyAction::Previous => Action::Previous,
                KeyAction::Next => Action::Next,
            }),
            InputEvent::PlaybackCompleted(id) => self.completed(id),
            InputEvent::PlaybackFailed { id, reason } => {
                if self.player.is_current(id) {
                    self.player.stop();
                    Err(PlayerError::Decode(reason))
                } else {
                    Ok(())
                }
            }
        };

        if let Err(e) = &result {
            tracing::warn!("Playback problem: {}", e);
            self.notice = Some(e.to_string());
        }
        result
    }

    /// Run a resolved action.
    pub fn dispatch(&mut self, action: Action) -> Result<(), PlayerError> {
        tracing::debug!("Dispatch {:?}", action);
        match action {
            Action::PlayPause => self.player.toggle_play_pause(),
            // Without a click position there is nowhere to jump to
            Action::Seek => Ok(()),
            Action::Previous => {
                if self.cursor.advance_previous(&self.catalog) {
                    self.play_selection()
                } else {
                    Ok(())
                }
            }
            Action::Next => {
                if self.cursor.advance_next(&self.catalog) {
                    self.play_selection()
                } else {
                    Ok(())
                }
            }
            Action::ShowView(view) => {
                self.cursor.set_view(view, &mut self.scroll);
                Ok(())
            }
            Action::SelectAlbum(album) => {
                self.cursor.select_album(&self.catalog, album);
                self.play_selection()
            }
            Action::PlayTrack { album, track } => {
                if self.cursor.selected_album() != album || !self.cursor.album_confirmed() {
                    self.cursor.select_album(&self.catalog, album);
                }
                self.cursor.select_track(&self.catalog, track);
                self.play_selection()
            }
        }
    }

    fn play_selection(&mut self) -> Result<(), PlayerError> {
        let (album, track) = self.cursor.position();
        self.player.play(&self.catalog, album, track)?;
        self.notice = None;
        Ok(())
    }

    fn wheel(&mut self, x: f32, y: f32, delta: f32) {
        let view = self.cursor.active_view();
        let (logical_x, _) = self.resolver.to_logical(x, y);
        // Left of the track column the album grid scrolls
        if view == View::Albums && logical_x < self.layout.track_column_x() {
            let extent = self.album_grid_extent();
            self.scroll.scroll_album_grid(delta * self.scroll_step, extent);
            return;
        }
        let extent = self.extent(view);
        self.scroll.scroll_by(view, delta * self.scroll_step, extent);
    }

    fn completed(&mut self, id: HandleId) -> Result<(), PlayerError> {
        if !self.player.is_current(id) {
            tracing::debug!("Ignoring completion of stale handle {}", id);
            return Ok(());
        }
        match self.player.on_playback_completed(&self.catalog, &mut self.cursor)? {
            Completion::Advanced { .. } => self.notice = None,
            Completion::Stopped => {}
        }
        Ok(())
    }
}
