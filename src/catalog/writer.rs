//! Inverse of the parser: serialize a catalog back to the descriptor format.

use std::io::{self, Write};

use super::Catalog;

/// Write a catalog using `\n` terminators.
///
/// For any descriptor parsed from `\n`-terminated input this reproduces
/// the input byte for byte.
pub fn write_catalog<W: Write>(catalog: &Catalog, mut out: W) -> io::Result<()> {
    writeln!(out, "{}", catalog.album_count())?;
    for album in catalog.albums() {
        writeln!(out, "{}", album.title())?;
        writeln!(out, "{}", album.artist())?;
        writeln!(out, "{}", album.artwork().as_str())?;
        writeln!(out, "{}", album.tracks().len())?;
        for track in album.tracks() {
            writeln!(out, "{}", track.name())?;
            writeln!(out, "{}", track.location())?;
        }
    }
    out.flush()
}

/// Convenience wrapper returning the serialized descriptor as a string.
pub fn to_descriptor_string(catalog: &Catalog) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_catalog(catalog, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
