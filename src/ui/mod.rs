//! iced window for the shelf.
//!
//! A single canvas paints the current [`Scene`]; everything it and the
//! keyboard report is forwarded to [`AppState`] as [`InputEvent`]s. Engine
//! completion and failure events are drained on a periodic tick so that
//! playback state only ever changes on the UI thread.

mod artwork;
mod canvas;
mod messages;
pub mod theme;

use std::time::Duration;

use iced::keyboard::{self, key::Named};
use iced::widget::Canvas;
use iced::{Color, Element, Length, Subscription, Task, time};

use crate::app::{AppState, InputEvent, KeyAction, Scene};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::player::{AudioEngine, EngineEvent};

pub use messages::Message;

/// How often engine events are drained.
const TICK: Duration = Duration::from_millis(100);

pub struct ShelfApp {
    state: AppState<AudioEngine>,
    scene: Scene,
    swatches: Vec<Option<Color>>,
    underruns: u32,
}

impl ShelfApp {
    pub fn new(catalog: Catalog, config: &Config) -> (Self, Task<Message>) {
        let media_root = config.media_root();
        let swatches = artwork::load_swatches(&catalog, &media_root);
        let engine = AudioEngine::new(media_root, config.audio.volume);
        let available = engine.is_available();

        let mut state = AppState::new(catalog, engine, config);
        if !available {
            state.set_notice("No audio output device");
        }
        let scene = state.render();

        tracing::info!(
            "Shelf ready: {} albums, {} tracks",
            state.catalog().album_count(),
            state.catalog().track_count()
        );

        (
            Self {
                state,
                scene,
                swatches,
                underruns: 0,
            },
            Task::none(),
        )
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            time::every(TICK).map(|_| Message::Tick),
            keyboard::on_key_press(|key, modifiers| Some(Message::KeyPressed(key, modifiers))),
        ])
    }

    pub fn view(&self) -> Element<'_, Message> {
        Canvas::new(canvas::ScenePainter::new(&self.scene, &self.swatches))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        if !matches!(message, Message::Tick) {
            tracing::trace!(target: "ui::update", "{:?}", message);
        }

        match message {
            Message::Canvas { scale, event } => {
                self.state.set_window_scale(scale);
                // Failures are already kept as the notice
                let _ = self.state.handle_input(event);
            }
            Message::KeyPressed(key, modifiers) => {
                if let Some(action) = key_action(&key, modifiers) {
                    let _ = self.state.handle_input(InputEvent::Key(action));
                }
            }
            Message::Tick => {
                let engine = self.state.player().backend();
                let events = engine.poll_events();
                let underruns = engine.underruns();
                if underruns > self.underruns {
                    tracing::debug!(
                        target: "ui::update",
                        "Audio underruns: {} (+{})",
                        underruns,
                        underruns - self.underruns
                    );
                    self.underruns = underruns;
                }
                // The progress readout moves while playing
                if events.is_empty() && !self.state.playback().is_playing {
                    return Task::none();
                }
                for event in events {
                    let _ = self.state.handle_input(engine_input(event));
                }
            }
        }

        self.scene = self.state.render();
        Task::none()
    }
}

/// Space toggles playback; the arrows act like the skip buttons.
fn key_action(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<KeyAction> {
    if modifiers.command() || modifiers.alt() {
        return None;
    }
    match key {
        keyboard::Key::Named(Named::Space) => Some(KeyAction::TogglePlayPause),
        keyboard::Key::Named(Named::ArrowLeft) => Some(KeyAction::Previous),
        keyboard::Key::Named(Named::ArrowRight) => Some(KeyAction::Next),
        _ => None,
    }
}

fn engine_input(event: EngineEvent) -> InputEvent {
    match event {
        EngineEvent::Finished(id) => InputEvent::PlaybackCompleted(id),
        EngineEvent::Failed(id, reason) => InputEvent::PlaybackFailed { id, reason },
    }
}
