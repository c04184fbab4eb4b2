//! Strict, eager parser for the line-oriented catalog descriptor.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{Album, ArtworkRef, Catalog, CatalogError, Track};

/// Load and parse a catalog descriptor from disk.
pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
    let file = File::open(path)?;
    let catalog = parse(BufReader::new(file))?;
    tracing::info!(
        "Loaded {} albums ({} tracks) from {:?}",
        catalog.album_count(),
        catalog.track_count(),
        path
    );
    Ok(catalog)
}

/// Parse a full catalog from a line-oriented stream.
///
/// Lines end at `\n`, `\r\n` or a lone `\r` and must be valid UTF-8;
/// text lines are otherwise kept byte for byte. Count lines must be
/// non-negative integers (surrounding whitespace is tolerated on counts
/// only). Blank lines after the last album are ignored, anything else
/// there is rejected.
pub fn parse<R: BufRead>(reader: R) -> Result<Catalog, CatalogError> {
    let mut lines = LineReader::new(reader);

    let album_count = lines.next_count("album count")?;
    let mut albums = Vec::with_capacity(album_count.min(1024));
    for _ in 0..album_count {
        albums.push(read_album(&mut lines)?);
    }

    lines.expect_end()?;
    Catalog::new(albums)
}

fn read_album<R: BufRead>(lines: &mut LineReader<R>) -> Result<Album, CatalogError> {
    let title = lines.next_text("album title")?;
    let artist = lines.next_text("album artist")?;
    let artwork = lines.next_text("artwork path")?;
    let track_count = lines.next_count("track count")?;

    let mut tracks = Vec::with_capacity(track_count.min(1024));
    for _ in 0..track_count {
        let name = lines.next_text("track name")?;
        let location = lines.next_text("track location")?;
        tracks.push(Track::new(name, location));
    }

    Ok(Album::new(title, artist, ArtworkRef::new(artwork), tracks))
}

/// Line cursor that remembers its 1-based position for error reporting.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`; the terminator is not part
/// of the line.
struct LineReader<R> {
    reader: R,
    line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: Vec::new(),
        }
    }

    /// Fill `buf` with the next raw line. Returns false at end of input.
    fn read_raw(&mut self) -> Result<bool, CatalogError> {
        self.buf.clear();
        let mut read_any = false;
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok(read_any);
            }
            read_any = true;
            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    let carriage_return = available[end] == b'\r';
                    self.buf.extend_from_slice(&available[..end]);
                    self.reader.consume(end + 1);
                    if carriage_return && self.reader.fill_buf()?.first() == Some(&b'\n') {
                        self.reader.consume(1);
                    }
                    return Ok(true);
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }
    }

    fn next_line(&mut self) -> Result<Option<&str>, CatalogError> {
        if !self.read_raw()? {
            return Ok(None);
        }
        self.line += 1;
        std::str::from_utf8(&self.buf)
            .map(Some)
            .map_err(|_| CatalogError::malformed(self.line, "invalid UTF-8"))
    }

    fn next_text(&mut self, what: &str) -> Result<String, CatalogError> {
        let expected_at = self.line + 1;
        match self.next_line()? {
            Some(text) => Ok(text.to_string()),
            None => Err(CatalogError::malformed(
                expected_at,
                format!("unexpected end of input, expected {}", what),
            )),
        }
    }

    fn next_count(&mut self, what: &str) -> Result<usize, CatalogError> {
        let text = self.next_text(what)?;
        text.trim().parse::<usize>().map_err(|_| {
            CatalogError::malformed(
                self.line,
                format!("expected {} as a non-negative integer, found {:?}", what, text),
            )
        })
    }

    fn expect_end(&mut self) -> Result<(), CatalogError> {
        while let Some(text) = self.next_line()? {
            if !text.trim().is_empty() {
                let line = self.line;
                return Err(CatalogError::malformed(
                    line,
                    "unexpected content after the last album",
                ));
            }
        }
        Ok(())
    }
}
