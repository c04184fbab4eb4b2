//! Owns the single active playback handle.

use crate::catalog::Catalog;
use crate::navigation::NavigationCursor;

use super::{AudioBackend, HandleId, PlaybackHandle, PlayerError, Progress};

struct Loaded<H> {
    handle: H,
    album: usize,
    track: usize,
}

/// Snapshot for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// `(album, track)` of the loaded resource, if any
    pub loaded: Option<(usize, usize)>,
    pub progress: Option<Progress>,
}

/// What happened when a track finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Cursor moved and the next track started
    Advanced { album: usize, track: usize },
    /// End of catalog, playback stopped
    Stopped,
}

/// Plays catalog tracks through an [`AudioBackend`], at most one at a time.
pub struct PlaybackController<B: AudioBackend> {
    backend: B,
    current: Option<Loaded<B::Handle>>,
    is_playing: bool,
}

impl<B: AudioBackend> PlaybackController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
            is_playing: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            is_playing: self.is_playing,
            loaded: self.current.as_ref().map(|l| (l.album, l.track)),
            progress: self.progress(),
        }
    }

    /// Elapsed and total time of the loaded track.
    pub fn progress(&self) -> Option<Progress> {
        self.current.as_ref().map(|l| l.handle.progress())
    }

    pub fn current_handle(&self) -> Option<HandleId> {
        self.current.as_ref().map(|l| l.handle.id())
    }

    /// Whether `id` names the currently loaded handle.
    pub fn is_current(&self, id: HandleId) -> bool {
        self.current_handle() == Some(id)
    }

    /// Release any loaded track, then open and start `album`/`track`.
    ///
    /// On failure nothing is loaded, `is_playing` is false and the error
    /// names the location that failed.
    pub fn play(&mut self, catalog: &Catalog, album: usize, track: usize) -> Result<(), PlayerError> {
        let Some(location) = catalog.track(album, track).map(|t| t.location().to_string()) else {
            debug_assert!(false, "track ({}, {}) out of range", album, track);
            return Ok(());
        };

        self.release();

        let mut handle = self
            .backend
            .open(&location)
            .map_err(|e| e.for_location(&location))?;
        if let Err(e) = handle.start() {
            handle.stop();
            return Err(e.for_location(&location));
        }

        tracing::info!("Playing {} ({}, {}) as {}", location, album, track, handle.id());
        self.current = Some(Loaded {
            handle,
            album,
            track,
        });
        self.is_playing = true;
        Ok(())
    }

    /// Flip between paused and playing. No-op with nothing loaded.
    pub fn toggle_play_pause(&mut self) -> Result<(), PlayerError> {
        let Some(loaded) = self.current.as_mut() else {
            return Ok(());
        };
        if self.is_playing {
            loaded.handle.pause()?;
            self.is_playing = false;
            tracing::debug!("Paused {}", loaded.handle.id());
        } else {
            loaded.handle.resume()?;
            self.is_playing = true;
            tracing::debug!("Resumed {}", loaded.handle.id());
        }
        Ok(())
    }

    /// Jump to `fraction` of the loaded track, clamped to 0.0 - 1.0.
    /// Ignored with nothing loaded or for a non-finite fraction.
    pub fn seek(&mut self, fraction: f32) -> Result<(), PlayerError> {
        let Some(loaded) = self.current.as_mut() else {
            return Ok(());
        };
        if !fraction.is_finite() {
            return Ok(());
        }
        let fraction = fraction.clamp(0.0, 1.0);
        loaded.handle.seek(fraction)?;
        tracing::debug!("Seek {} to {:.3}", loaded.handle.id(), fraction);
        Ok(())
    }

    /// The loaded track played to its end: advance the cursor and play the
    /// next track, or stop at the end of the catalog.
    pub fn on_playback_completed(
        &mut self,
        catalog: &Catalog,
        cursor: &mut NavigationCursor,
    ) -> Result<Completion, PlayerError> {
        self.is_playing = false;
        if cursor.advance_next(catalog) {
            let (album, track) = cursor.position();
            self.play(catalog, album, track)?;
            Ok(Completion::Advanced { album, track })
        } else {
            tracing::info!("End of catalog, playback stopped");
            self.release();
            Ok(Completion::Stopped)
        }
    }

    /// Stop and release whatever is loaded.
    pub fn stop(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut loaded) = self.current.take() {
            loaded.handle.stop();
            tracing::debug!("Released {}", loaded.handle.id());
        }
        self.is_playing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{Call, MOCK_TRACK_LENGTH, MockBackend, sample_catalog};
    use std::time::Duration;

    fn controller() -> PlaybackController<MockBackend> {
        PlaybackController::new(MockBackend::new())
    }

    #[test]
    fn test_play_opens_and_starts() {
        let catalog = sample_catalog();
        let mut player = controller();
        player.play(&catalog, 0, 1).unwrap();
        assert!(player.is_playing());
        assert_eq!(player.state().loaded, Some((0, 1)));
        assert_eq!(
            player.backend().calls(),
            vec![
                Call::Open("sounds/midnights-2.mp3".into()),
                Call::Start(HandleId(1)),
            ]
        );
    }

    #[test]
    fn test_play_releases_previous_handle_first() {
        let catalog = sample_catalog();
        let mut player = controller();
        player.play(&catalog, 0, 0).unwrap();
        player.play(&catalog, 1, 0).unwrap();
        let calls = player.backend().calls();
        assert_eq!(calls[2], Call::Stop(HandleId(1)));
        assert_eq!(calls[3], Call::Open("sounds/am-1.mp3".into()));
        assert_eq!(player.backend().live_handles(), 1);
    }

    #[test]
    fn test_toggle_without_handle_is_noop() {
        let mut player = controller();
        player.toggle_play_pause().unwrap();
        assert!(!player.is_playing());
        assert!(player.backend().calls().is_empty());
    }

    #[test]
    fn test_toggle_pauses_and_resumes() {
        let catalog = sample_catalog();
        let mut player = controller();
        player.play(&catalog, 0, 0).unwrap();
        player.toggle_play_pause().unwrap();
        assert!(!player.is_playing());
        player.toggle_play_pause().unwrap();
        assert!(player.is_playing());
        let calls = player.backend().calls();
        assert_eq!(calls[2], Call::Pause(HandleId(1)));
        assert_eq!(calls[3], Call::Resume(HandleId(1)));
    }

    #[test]
    fn test_open_failure_is_resource_error() {
        let catalog = sample_catalog();
        let mut player = PlaybackController::new(MockBackend::failing_on(&["sounds/am-1.mp3"]));
        player.play(&catalog, 0, 0).unwrap();

        let err = player.play(&catalog, 1, 0).unwrap_err();
        assert!(matches!(err, PlayerError::Resource { ref location, .. } if location == "sounds/am-1.mp3"));
        assert!(!player.is_playing());
        assert_eq!(player.state().loaded, None);
        assert_eq!(player.backend().live_handles(), 0);
    }

    #[test]
    fn test_start_failure_releases_handle() {
        let catalog = sample_catalog();
        let mut backend = MockBackend::new();
        backend.fail_start = true;
        let mut player = PlaybackController::new(backend);
        assert!(player.play(&catalog, 0, 0).is_err());
        assert!(!player.is_playing());
        assert_eq!(player.backend().live_handles(), 0);
    }

    #[test]
    fn test_completion_advances_across_albums() {
        let catalog = sample_catalog();
        let mut cursor = NavigationCursor::new();
        let mut player = controller();
        cursor.select_track(&catalog, 2);
        player.play(&catalog, 0, 2).unwrap();

        let outcome = player.on_playback_completed(&catalog, &mut cursor).unwrap();
        assert_eq!(outcome, Completion::Advanced { album: 1, track: 0 });
        assert_eq!(cursor.position(), (1, 0));
        assert!(player.is_playing());
        assert_eq!(
            player.backend().calls().last(),
            Some(&Call::Start(HandleId(2)))
        );
        assert!(player.backend().calls().contains(&Call::Open("sounds/am-1.mp3".into())));

        let outcome = player.on_playback_completed(&catalog, &mut cursor).unwrap();
        assert_eq!(outcome, Completion::Stopped);
        assert_eq!(cursor.position(), (1, 0));
        assert!(!player.is_playing());
        assert_eq!(player.current_handle(), None);
    }

    #[test]
    fn test_completion_open_failure_keeps_cursor_moved() {
        let catalog = sample_catalog();
        let mut cursor = NavigationCursor::new();
        let mut player = PlaybackController::new(MockBackend::failing_on(&["sounds/midnights-2.mp3"]));
        player.play(&catalog, 0, 0).unwrap();

        assert!(player.on_playback_completed(&catalog, &mut cursor).is_err());
        assert_eq!(cursor.position(), (0, 1));
        assert!(!player.is_playing());
    }

    #[test]
    fn test_seek_clamps_fraction() {
        let catalog = sample_catalog();
        let mut player = controller();
        player.play(&catalog, 0, 0).unwrap();

        player.seek(1.7).unwrap();
        player.seek(-0.3).unwrap();
        player.seek(0.25).unwrap();
        player.seek(f32::NAN).unwrap();
        let seeks: Vec<Call> = player
            .backend()
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Seek(..)))
            .collect();
        assert_eq!(
            seeks,
            vec![
                Call::Seek(HandleId(1), 1.0),
                Call::Seek(HandleId(1), 0.0),
                Call::Seek(HandleId(1), 0.25),
            ]
        );
    }

    #[test]
    fn test_seek_without_handle_is_noop() {
        let mut player = controller();
        player.seek(0.5).unwrap();
        assert!(player.backend().calls().is_empty());
        assert_eq!(player.progress(), None);
    }

    #[test]
    fn test_progress_reads_loaded_handle() {
        let catalog = sample_catalog();
        let mut player = controller();
        player.play(&catalog, 0, 0).unwrap();
        assert_eq!(player.progress(), Some(Progress::new(Duration::ZERO, MOCK_TRACK_LENGTH)));

        player.seek(0.5).unwrap();
        let progress = player.state().progress.unwrap();
        assert_eq!(progress.position, MOCK_TRACK_LENGTH / 2);
        assert!((progress.fraction() - 0.5).abs() < 0.001);

        player.stop();
        assert_eq!(player.state().progress, None);
    }

    #[test]
    fn test_is_current_tracks_latest_handle() {
        let catalog = sample_catalog();
        let mut player = controller();
        player.play(&catalog, 0, 0).unwrap();
        player.play(&catalog, 0, 1).unwrap();
        assert!(!player.is_current(HandleId(1)));
        assert!(player.is_current(HandleId(2)));
    }
}
