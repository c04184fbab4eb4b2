//! Read-only JSON projection of the catalog, as served to web clients.
//!
//! Indices (`album_id`, `track_id`) are zero-based positions into the
//! catalog and match the navigation cursor's own indexing.

use serde::{Deserialize, Serialize};

use super::{Album, ArtistEntry, ArtworkRef, Catalog, CatalogError, SongEntry, Track};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackJson {
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumJson {
    pub title: String,
    pub artist: String,
    pub artwork: String,
    pub tracks: Vec<TrackJson>,
}

/// A track flattened together with its album context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTrackJson {
    pub name: String,
    pub location: String,
    pub artist: String,
    pub album: String,
    pub album_id: usize,
    pub track_id: usize,
    pub artwork: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistJson {
    pub name: String,
    pub album_count: usize,
    pub albums: Vec<AlbumJson>,
}

impl From<&Track> for TrackJson {
    fn from(track: &Track) -> Self {
        Self {
            name: track.name().to_string(),
            location: track.location().to_string(),
        }
    }
}

impl From<&Album> for AlbumJson {
    fn from(album: &Album) -> Self {
        Self {
            title: album.title().to_string(),
            artist: album.artist().to_string(),
            artwork: album.artwork().as_str().to_string(),
            tracks: album.tracks().iter().map(TrackJson::from).collect(),
        }
    }
}

impl From<SongEntry<'_>> for FlatTrackJson {
    fn from(song: SongEntry<'_>) -> Self {
        Self {
            name: song.track.name().to_string(),
            location: song.track.location().to_string(),
            artist: song.album.artist().to_string(),
            album: song.album.title().to_string(),
            album_id: song.album_index,
            track_id: song.track_index,
            artwork: song.album.artwork().as_str().to_string(),
        }
    }
}

impl From<&ArtistEntry<'_>> for ArtistJson {
    fn from(artist: &ArtistEntry<'_>) -> Self {
        Self {
            name: artist.name.to_string(),
            album_count: artist.album_count(),
            albums: artist.albums.iter().map(|(_, a)| AlbumJson::from(*a)).collect(),
        }
    }
}

/// All albums in catalog order.
pub fn albums(catalog: &Catalog) -> Vec<AlbumJson> {
    catalog.albums().iter().map(AlbumJson::from).collect()
}

/// Every track, flattened.
pub fn tracks(catalog: &Catalog) -> Vec<FlatTrackJson> {
    catalog.songs().map(FlatTrackJson::from).collect()
}

/// Unique artists with their albums.
pub fn artists(catalog: &Catalog) -> Vec<ArtistJson> {
    catalog.artists().iter().map(ArtistJson::from).collect()
}

impl TryFrom<Vec<AlbumJson>> for Catalog {
    type Error = CatalogError;

    /// Rebuild a catalog from its album projection, with the same
    /// emptiness checks as parsing.
    fn try_from(albums: Vec<AlbumJson>) -> Result<Self, Self::Error> {
        let albums = albums
            .into_iter()
            .map(|a| {
                let tracks = a
                    .tracks
                    .into_iter()
                    .map(|t| Track::new(t.name, t.location))
                    .collect();
                Album::new(a.title, a.artist, ArtworkRef::new(a.artwork), tracks)
            })
            .collect();
        Catalog::new(albums)
    }
}
