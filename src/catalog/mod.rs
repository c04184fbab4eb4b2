//! The album/track catalog loaded at startup.
//!
//! A [`Catalog`] is built once (by the [`parser`] or from the JSON
//! [`projection`]) and never mutated afterwards. Every album has at least
//! one track and every catalog has at least one album; both are checked at
//! construction so navigation can index freely.
//!
//! # Descriptor format
//!
//! ```text
//! albumCount
//! albumTitle / albumArtist / artworkPath / trackCount
//! trackName / trackLocation   (trackCount times)
//! ```

pub mod parser;
pub mod projection;
pub mod writer;

use std::path::{Path, PathBuf};

pub use parser::{load, parse};
pub use writer::write_catalog;

/// A single playable track.
///
/// `location` is handed to the audio backend untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    name: String,
    location: String,
}

impl Track {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Opaque reference to an album's artwork image.
///
/// Stored and forwarded, never decoded by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtworkRef(String);

impl ArtworkRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against a base directory (relative references only).
    pub fn resolve(&self, base: &Path) -> PathBuf {
        let path = Path::new(&self.0);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }
}

/// An album with its ordered, non-empty track list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    title: String,
    artist: String,
    artwork: ArtworkRef,
    tracks: Vec<Track>,
}

impl Album {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        artwork: ArtworkRef,
        tracks: Vec<Track>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            artwork,
            tracks,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn artwork(&self) -> &ArtworkRef {
        &self.artwork
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Index of the final track. Albums are never empty.
    pub fn last_track_index(&self) -> usize {
        self.tracks.len().saturating_sub(1)
    }
}

/// One row of the flattened song list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SongEntry<'a> {
    pub album_index: usize,
    pub track_index: usize,
    pub album: &'a Album,
    pub track: &'a Track,
}

/// An artist and the albums credited to them, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistEntry<'a> {
    pub name: &'a str,
    pub albums: Vec<(usize, &'a Album)>,
}

impl ArtistEntry<'_> {
    pub fn album_count(&self) -> usize {
        self.albums.len()
    }
}

/// The full, validated album collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    albums: Vec<Album>,
}

impl Catalog {
    /// Build a catalog, rejecting empty catalogs and empty albums.
    pub fn new(albums: Vec<Album>) -> Result<Self, CatalogError> {
        if albums.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        if let Some((index, album)) = albums
            .iter()
            .enumerate()
            .find(|(_, album)| album.tracks.is_empty())
        {
            return Err(CatalogError::EmptyAlbum {
                index,
                title: album.title.clone(),
            });
        }
        Ok(Self { albums })
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn album(&self, index: usize) -> Option<&Album> {
        self.albums.get(index)
    }

    pub fn track(&self, album: usize, track: usize) -> Option<&Track> {
        self.album(album).and_then(|a| a.track(track))
    }

    pub fn album_count(&self) -> usize {
        self.albums.len()
    }

    pub fn last_album_index(&self) -> usize {
        self.albums.len().saturating_sub(1)
    }

    /// Total number of tracks across all albums.
    pub fn track_count(&self) -> usize {
        self.albums.iter().map(|a| a.tracks.len()).sum()
    }

    /// Every track in album order, tagged with its album/track indices.
    pub fn songs(&self) -> impl Iterator<Item = SongEntry<'_>> {
        self.albums
            .iter()
            .enumerate()
            .flat_map(|(album_index, album)| {
                album
                    .tracks
                    .iter()
                    .enumerate()
                    .map(move |(track_index, track)| SongEntry {
                        album_index,
                        track_index,
                        album,
                        track,
                    })
            })
    }

    /// Unique artists in order of first appearance.
    pub fn artists(&self) -> Vec<ArtistEntry<'_>> {
        let mut artists: Vec<ArtistEntry<'_>> = Vec::new();
        for (index, album) in self.albums.iter().enumerate() {
            match artists.iter_mut().find(|a| a.name == album.artist) {
                Some(entry) => entry.albums.push((index, album)),
                None => artists.push(ArtistEntry {
                    name: &album.artist,
                    albums: vec![(index, album)],
                }),
            }
        }
        artists
    }
}

/// Catalog loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Missing line, non-numeric count or truncated input.
    #[error("Malformed catalog at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Catalog contains no albums")]
    EmptyCatalog,

    #[error("Album {index} ({title}) contains no tracks")]
    EmptyAlbum { index: usize, title: String },

    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }
}
