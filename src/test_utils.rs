//! Test fixtures: small catalogs and a recording audio backend.

use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::catalog::{Album, ArtworkRef, Catalog, Track};
use crate::player::{AudioBackend, HandleId, PlaybackHandle, PlayerError, Progress};

/// Length every mock track reports.
pub const MOCK_TRACK_LENGTH: Duration = Duration::from_secs(200);

/// Run `f` with a plain-text subscriber installed and return its result
/// together with everything logged meanwhile.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buf);
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || LogSink(Arc::clone(&sink)))
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buf.lock()).into_owned();
    (result, logs)
}

struct LogSink(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Two albums: "Midnights" with three tracks, "AM" with one.
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        Album::new(
            "Midnights",
            "Taylor Swift",
            ArtworkRef::new("images/midnights.png"),
            vec![
                Track::new("Lavender Haze", "sounds/midnights-1.mp3"),
                Track::new("Anti-Hero", "sounds/midnights-2.mp3"),
                Track::new("Karma", "sounds/midnights-3.mp3"),
            ],
        ),
        Album::new(
            "AM",
            "Arctic Monkeys",
            ArtworkRef::new("images/am.png"),
            vec![Track::new("Do I Wanna Know?", "sounds/am-1.mp3")],
        ),
    ])
    .expect("fixture catalog is valid")
}

/// Three albums where the first and last share an artist.
pub fn shared_artist_catalog() -> Catalog {
    Catalog::new(vec![
        Album::new(
            "AM",
            "Arctic Monkeys",
            ArtworkRef::new("images/am.png"),
            vec![Track::new("R U Mine?", "sounds/am-2.mp3")],
        ),
        Album::new(
            "SOUR",
            "Olivia Rodrigo",
            ArtworkRef::new("images/sour.png"),
            vec![
                Track::new("drivers license", "sounds/sour-1.mp3"),
                Track::new("good 4 u", "sounds/sour-2.mp3"),
            ],
        ),
        Album::new(
            "Favourite Worst Nightmare",
            "Arctic Monkeys",
            ArtworkRef::new("images/fwn.png"),
            vec![Track::new("Brianstorm", "sounds/fwn-1.mp3")],
        ),
    ])
    .expect("fixture catalog is valid")
}

/// A catalog whose album `i` has `shape[i]` tracks.
pub fn catalog_with_shape(shape: &[usize]) -> Catalog {
    let albums = shape
        .iter()
        .enumerate()
        .map(|(a, &count)| {
            let tracks = (0..count)
                .map(|t| Track::new(format!("Track {}-{}", a, t), format!("sounds/{}-{}.mp3", a, t)))
                .collect();
            Album::new(
                format!("Album {}", a),
                format!("Artist {}", a % 3),
                ArtworkRef::new(format!("images/{}.png", a)),
                tracks,
            )
        })
        .collect();
    Catalog::new(albums).expect("shape must be non-empty with non-zero counts")
}

/// A backend call, as recorded by [`MockBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Open(String),
    Start(HandleId),
    Pause(HandleId),
    Resume(HandleId),
    Seek(HandleId, f32),
    Stop(HandleId),
}

#[derive(Debug, Default)]
struct Log {
    calls: Vec<Call>,
    live: HashSet<HandleId>,
}

/// Records every call instead of producing sound.
#[derive(Debug, Default)]
pub struct MockBackend {
    log: Rc<RefCell<Log>>,
    failing: HashSet<String>,
    next_id: u64,
    /// Make every `start` fail
    pub fail_start: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opening any of `locations` fails.
    pub fn failing_on(locations: &[&str]) -> Self {
        Self {
            failing: locations.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().calls.clone()
    }

    /// Handles opened and not yet stopped.
    pub fn live_handles(&self) -> usize {
        self.log.borrow().live.len()
    }
}

impl AudioBackend for MockBackend {
    type Handle = MockHandle;

    fn open(&mut self, location: &str) -> Result<MockHandle, PlayerError> {
        self.log.borrow_mut().calls.push(Call::Open(location.to_string()));
        if self.failing.contains(location) {
            return Err(PlayerError::FileNotFound(location.to_string()));
        }
        self.next_id += 1;
        let id = HandleId(self.next_id);
        self.log.borrow_mut().live.insert(id);
        Ok(MockHandle {
            id,
            log: Rc::clone(&self.log),
            fail_start: self.fail_start,
            position: Duration::ZERO,
        })
    }
}

#[derive(Debug)]
pub struct MockHandle {
    id: HandleId,
    log: Rc<RefCell<Log>>,
    fail_start: bool,
    position: Duration,
}

impl MockHandle {
    fn record(&self, call: Call) {
        self.log.borrow_mut().calls.push(call);
    }
}

impl PlaybackHandle for MockHandle {
    fn id(&self) -> HandleId {
        self.id
    }

    fn start(&mut self) -> Result<(), PlayerError> {
        self.record(Call::Start(self.id));
        if self.fail_start {
            return Err(PlayerError::AudioInit("mock start failure".into()));
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.record(Call::Pause(self.id));
        Ok(())
    }

    fn resume(&mut self) -> Result<(), PlayerError> {
        self.record(Call::Resume(self.id));
        Ok(())
    }

    fn seek(&mut self, fraction: f32) -> Result<(), PlayerError> {
        self.record(Call::Seek(self.id, fraction));
        self.position = MOCK_TRACK_LENGTH.mul_f32(fraction);
        Ok(())
    }

    fn progress(&self) -> Progress {
        Progress::new(self.position, MOCK_TRACK_LENGTH)
    }

    fn stop(&mut self) {
        self.record(Call::Stop(self.id));
        self.log.borrow_mut().live.remove(&self.id);
    }
}
