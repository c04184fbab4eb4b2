//! Audio output using cpal, fed by a decoder thread.
//!
//! The decoder thread owns the active track, converts it to the device's
//! rate and channel layout, and pushes chunks to the output callback over
//! a small bounded channel, followed by an end marker once the file is
//! exhausted. The callback reports completion when it reaches that marker,
//! so a track only counts as finished after its last sample was played.
//! Failures come from the decoder thread. Both arrive as [`EngineEvent`]s
//! which the UI drains on its tick.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use parking_lot::RwLock;

use super::decoder::AudioDecoder;
use super::resampler::{Resampler, remap_channels};
use super::state::{EngineCommand, EngineEvent, EngineShared, HandleId, PlaybackStatus, Progress};
use super::{AudioBackend, PlaybackHandle, PlayerError};

/// Chunks buffered between the decoder thread and the device callback.
const CHUNK_BUFFER: usize = 8;

/// The real playback backend.
pub struct AudioEngine {
    media_root: PathBuf,
    shared: Arc<RwLock<EngineShared>>,
    command_tx: Sender<EngineCommand>,
    event_rx: Receiver<EngineEvent>,
    output: Option<AudioOutput>,
    next_id: u64,
}

impl AudioEngine {
    /// Start the engine. Track locations are resolved against `media_root`.
    ///
    /// A missing or broken output device is logged, not fatal: the engine
    /// still exists and every `open` reports [`PlayerError::AudioInit`].
    pub fn new(media_root: PathBuf, volume: f32) -> Self {
        let shared = Arc::new(RwLock::new(EngineShared::new(volume)));
        let (command_tx, command_rx) = bounded(32);
        let (event_tx, event_rx) = unbounded();

        let output = match AudioOutput::start(Arc::clone(&shared), command_rx, event_tx) {
            Ok(output) => Some(output),
            Err(e) => {
                tracing::error!("Audio output unavailable: {}", e);
                None
            }
        };

        Self {
            media_root,
            shared,
            command_tx,
            event_rx,
            output,
            next_id: 0,
        }
    }

    pub fn is_available(&self) -> bool {
        self.output.is_some()
    }

    /// Drain pending engine events without blocking.
    pub fn poll_events(&self) -> Vec<EngineEvent> {
        self.event_rx.try_iter().collect()
    }

    /// Device callbacks that found no decoded audio waiting.
    pub fn underruns(&self) -> u32 {
        self.shared.read().underruns
    }
}

impl AudioBackend for AudioEngine {
    type Handle = EngineHandle;

    fn open(&mut self, location: &str) -> Result<EngineHandle, PlayerError> {
        if self.output.is_none() {
            return Err(PlayerError::AudioInit("no audio output device".to_string()));
        }

        let path = resolve_location(&self.media_root, location);
        let decoder = AudioDecoder::open(&path)?;
        tracing::debug!(
            "Opened {:?}: {}Hz, {} channels, {:?}",
            path,
            decoder.sample_rate(),
            decoder.channels(),
            decoder.duration()
        );

        self.next_id += 1;
        Ok(EngineHandle {
            id: HandleId(self.next_id),
            duration: decoder.duration(),
            decoder: Some(Box::new(decoder)),
            command_tx: self.command_tx.clone(),
            shared: Arc::clone(&self.shared),
        })
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        let _ = self.command_tx.send(EngineCommand::Shutdown);
    }
}

/// One opened track. Dropping the handle does not stop playback; call
/// [`PlaybackHandle::stop`].
pub struct EngineHandle {
    id: HandleId,
    duration: Duration,
    decoder: Option<Box<AudioDecoder>>,
    command_tx: Sender<EngineCommand>,
    shared: Arc<RwLock<EngineShared>>,
}

impl EngineHandle {
    fn send(&self, command: EngineCommand) -> Result<(), PlayerError> {
        self.command_tx
            .send(command)
            .map_err(|_| PlayerError::ChannelClosed)
    }
}

impl PlaybackHandle for EngineHandle {
    fn id(&self) -> HandleId {
        self.id
    }

    fn start(&mut self) -> Result<(), PlayerError> {
        let decoder = self
            .decoder
            .take()
            .ok_or_else(|| PlayerError::Decode("track already started".to_string()))?;
        self.send(EngineCommand::Start(self.id, decoder))
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.send(EngineCommand::Pause(self.id))
    }

    fn resume(&mut self) -> Result<(), PlayerError> {
        self.send(EngineCommand::Resume(self.id))
    }

    fn seek(&mut self, fraction: f32) -> Result<(), PlayerError> {
        self.send(EngineCommand::Seek(self.id, fraction))
    }

    fn progress(&self) -> Progress {
        let s = self.shared.read();
        let position = if s.active == Some(self.id) {
            s.position.min(self.duration)
        } else {
            Duration::ZERO
        };
        Progress::new(position, self.duration)
    }

    fn stop(&mut self) {
        let _ = self.send(EngineCommand::Stop(self.id));
    }
}

/// Device stream plus the decoder thread feeding it.
struct AudioOutput {
    _stream: Stream,
    _decoder_thread: JoinHandle<()>,
}

impl AudioOutput {
    fn start(
        shared: Arc<RwLock<EngineShared>>,
        command_rx: Receiver<EngineCommand>,
        event_tx: Sender<EngineEvent>,
    ) -> Result<Self, PlayerError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| PlayerError::AudioInit("No output device found".to_string()))?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        tracing::info!("Using audio device: {}", device_name);

        let supported = device
            .default_output_config()
            .map_err(|e| PlayerError::AudioInit(e.to_string()))?;
        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels();
        tracing::info!("Audio format: {}Hz, {} channels", sample_rate, channels);

        let config = StreamConfig {
            channels,
            sample_rate: supported.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        let (audio_tx, audio_rx) = bounded::<Feed>(CHUNK_BUFFER);
        let feed_events = event_tx.clone();

        let thread_shared = Arc::clone(&shared);
        let decoder_thread = thread::Builder::new()
            .name("audio-decoder".to_string())
            .spawn(move || {
                let mut ctx = DecoderContext::new(sample_rate, channels);
                ctx.run(&thread_shared, &command_rx, &audio_tx, &event_tx);
            })
            .map_err(|e| PlayerError::AudioInit(e.to_string()))?;

        let feed = OutputFeed::new(audio_rx, shared, feed_events);
        let stream = match supported.sample_format() {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, feed),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, feed),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, feed),
            format => {
                return Err(PlayerError::AudioInit(format!(
                    "Unsupported sample format: {:?}",
                    format
                )));
            }
        }
        .map_err(|e| PlayerError::AudioInit(e.to_string()))?;

        stream
            .play()
            .map_err(|e| PlayerError::AudioInit(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            _decoder_thread: decoder_thread,
        })
    }
}

/// Device-ready samples tagged with the handle and seek generation they
/// were decoded for.
struct AudioChunk {
    id: HandleId,
    generation: u32,
    timestamp: Duration,
    samples: Vec<f32>,
}

impl AudioChunk {
    fn is_live(&self, active: Option<HandleId>, generation: u32) -> bool {
        active == Some(self.id) && self.generation == generation
    }
}

/// What the decoder thread hands to the output callback.
enum Feed {
    Audio(AudioChunk),
    /// Every chunk of this handle has been queued
    End(HandleId),
}

/// Output-callback side of the audio queue.
struct OutputFeed {
    audio_rx: Receiver<Feed>,
    shared: Arc<RwLock<EngineShared>>,
    event_tx: Sender<EngineEvent>,
    current: Option<(AudioChunk, usize)>,
}

impl OutputFeed {
    fn new(
        audio_rx: Receiver<Feed>,
        shared: Arc<RwLock<EngineShared>>,
        event_tx: Sender<EngineEvent>,
    ) -> Self {
        Self {
            audio_rx,
            shared,
            event_tx,
            current: None,
        }
    }

    /// Fill one device buffer. Silence covers pauses, underruns and
    /// everything after a track's end marker.
    fn fill<T>(&mut self, data: &mut [T])
    where
        T: cpal::Sample + cpal::FromSample<f32>,
    {
        let silence = T::from_sample(0.0f32);
        let (status, active, generation, volume) = {
            let s = self.shared.read();
            (s.status, s.active, s.generation, s.volume)
        };

        // Leftovers from a stopped track or from before a seek are dropped
        if self
            .current
            .as_ref()
            .is_some_and(|(chunk, _)| !chunk.is_live(active, generation))
        {
            self.current = None;
        }

        if status != PlaybackStatus::Playing {
            data.fill(silence);
            return;
        }

        let mut pos = 0;
        while pos < data.len() {
            if self.current.is_none() {
                match self.audio_rx.try_recv() {
                    Ok(Feed::Audio(chunk)) if !chunk.is_live(active, generation) => continue,
                    Ok(Feed::Audio(chunk)) => {
                        self.shared.write().position = chunk.timestamp;
                        self.current = Some((chunk, 0));
                    }
                    Ok(Feed::End(id)) if Some(id) == active => {
                        self.finish(id);
                        data[pos..].fill(silence);
                        return;
                    }
                    Ok(Feed::End(_)) => continue,
                    Err(_) => {
                        self.shared.write().underruns += 1;
                        data[pos..].fill(silence);
                        return;
                    }
                }
            }

            if let Some((chunk, offset)) = self.current.as_mut() {
                let n = (chunk.samples.len() - *offset).min(data.len() - pos);
                for i in 0..n {
                    data[pos + i] = T::from_sample(chunk.samples[*offset + i] * volume);
                }
                *offset += n;
                pos += n;
                if *offset >= chunk.samples.len() {
                    self.current = None;
                }
            }
        }
    }

    /// The last sample of `id` has gone to the device.
    fn finish(&mut self, id: HandleId) {
        {
            let mut s = self.shared.write();
            let end = s.duration;
            s.status = PlaybackStatus::Stopped;
            s.position = end;
        }
        let _ = self.event_tx.send(EngineEvent::Finished(id));
    }
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    mut feed: OutputFeed,
) -> Result<Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| feed.fill(data),
        |err| {
            tracing::error!("Audio stream error: {}", err);
        },
        None,
    )
}

struct ActiveTrack {
    id: HandleId,
    decoder: Box<AudioDecoder>,
    resampler: Resampler,
    paused: bool,
    /// Timestamp of the most recent packet
    timestamp: Duration,
}

/// Decoder thread state.
struct DecoderContext {
    device_rate: u32,
    device_channels: u16,
    active: Option<ActiveTrack>,
    generation: u32,
}

impl DecoderContext {
    fn new(device_rate: u32, device_channels: u16) -> Self {
        Self {
            device_rate,
            device_channels,
            active: None,
            generation: 0,
        }
    }

    fn run(
        &mut self,
        shared: &RwLock<EngineShared>,
        command_rx: &Receiver<EngineCommand>,
        audio_tx: &Sender<Feed>,
        event_tx: &Sender<EngineEvent>,
    ) {
        loop {
            let idle = self.active.as_ref().is_none_or(|t| t.paused);

            // Block on commands when idle, poll when decoding
            let command = if idle {
                match command_rx.recv() {
                    Ok(cmd) => Some(cmd),
                    Err(_) => break,
                }
            } else {
                command_rx.try_recv().ok()
            };

            if let Some(cmd) = command {
                if !self.handle_command(cmd, shared, event_tx) {
                    break;
                }
            }

            if self.active.as_ref().is_some_and(|t| !t.paused) {
                if audio_tx.is_full() {
                    thread::sleep(Duration::from_millis(5));
                    continue;
                }
                if !self.decode_and_send(shared, audio_tx, event_tx) {
                    break;
                }
            }
        }
        tracing::debug!("Decoder thread exiting");
    }

    /// Apply a command. Returns false on shutdown.
    fn handle_command(
        &mut self,
        cmd: EngineCommand,
        shared: &RwLock<EngineShared>,
        event_tx: &Sender<EngineEvent>,
    ) -> bool {
        match cmd {
            EngineCommand::Start(id, decoder) => {
                match Resampler::new(decoder.sample_rate(), self.device_rate, self.device_channels) {
                    Ok(resampler) => {
                        let duration = decoder.duration();
                        self.active = Some(ActiveTrack {
                            id,
                            decoder,
                            resampler,
                            paused: false,
                            timestamp: Duration::ZERO,
                        });
                        let mut s = shared.write();
                        s.active = Some(id);
                        s.status = PlaybackStatus::Playing;
                        s.position = Duration::ZERO;
                        s.duration = duration;
                    }
                    Err(e) => {
                        let _ = event_tx.send(EngineEvent::Failed(id, e.to_string()));
                    }
                }
            }
            EngineCommand::Pause(id) => self.set_paused(id, true, shared),
            EngineCommand::Resume(id) => self.set_paused(id, false, shared),
            EngineCommand::Seek(id, fraction) => {
                let generation = self.generation.wrapping_add(1);
                if let Some(track) = self.track_mut(id) {
                    match track.decoder.seek(fraction) {
                        Ok(target) => {
                            track.resampler.reset();
                            track.timestamp = target;
                            self.generation = generation;
                            let mut s = shared.write();
                            s.generation = generation;
                            s.position = target;
                            tracing::debug!("Handle {} seeked to {:?}", id, target);
                        }
                        Err(e) => tracing::warn!("Seek on handle {} failed: {}", id, e),
                    }
                }
            }
            EngineCommand::Stop(id) => {
                if self.track_mut(id).is_some() {
                    self.active = None;
                }
                let mut s = shared.write();
                if s.active == Some(id) {
                    s.active = None;
                    s.status = PlaybackStatus::Stopped;
                }
            }
            EngineCommand::Shutdown => return false,
        }
        true
    }

    /// Pause or resume `id`. The output may still be playing the queued
    /// tail of a fully decoded track, so the shared status follows the
    /// handle even when the decoder is done with it.
    fn set_paused(&mut self, id: HandleId, paused: bool, shared: &RwLock<EngineShared>) {
        if let Some(track) = self.track_mut(id) {
            track.paused = paused;
        }
        let mut s = shared.write();
        if s.active == Some(id) && s.status != PlaybackStatus::Stopped {
            s.status = if paused {
                PlaybackStatus::Paused
            } else {
                PlaybackStatus::Playing
            };
        }
    }

    fn track_mut(&mut self, id: HandleId) -> Option<&mut ActiveTrack> {
        self.active.as_mut().filter(|t| t.id == id)
    }

    /// Decode one packet. Returns false if the output side has gone away.
    fn decode_and_send(
        &mut self,
        shared: &RwLock<EngineShared>,
        audio_tx: &Sender<Feed>,
        event_tx: &Sender<EngineEvent>,
    ) -> bool {
        let generation = self.generation;
        let Some(track) = self.active.as_mut() else {
            return true;
        };
        let id = track.id;

        match track.decoder.decode_next() {
            Ok(Some(packet)) => {
                track.timestamp = packet.timestamp;
                let samples =
                    remap_channels(&packet.samples, track.decoder.channels(), self.device_channels);
                let samples = track.resampler.process(&samples);
                if samples.is_empty() {
                    return true;
                }
                let chunk = AudioChunk {
                    id,
                    generation,
                    timestamp: packet.timestamp,
                    samples,
                };
                audio_tx.send(Feed::Audio(chunk)).is_ok()
            }
            Ok(None) => {
                let tail = AudioChunk {
                    id,
                    generation,
                    timestamp: track.timestamp,
                    samples: track.resampler.flush(),
                };
                self.active = None;
                if !tail.samples.is_empty() && audio_tx.send(Feed::Audio(tail)).is_err() {
                    return false;
                }
                tracing::debug!("Decoded all of handle {}", id);
                audio_tx.send(Feed::End(id)).is_ok()
            }
            Err(e) => {
                tracing::error!("Decode error on handle {}: {}", id, e);
                self.active = None;
                {
                    let mut s = shared.write();
                    s.active = None;
                    s.status = PlaybackStatus::Stopped;
                }
                let _ = event_tx.send(EngineEvent::Failed(id, e.to_string()));
                true
            }
        }
    }
}

/// Resolve a catalog location against the media root. Absolute
/// locations are used as-is.
pub fn resolve_location(media_root: &Path, location: &str) -> PathBuf {
    media_root.join(location)
}
