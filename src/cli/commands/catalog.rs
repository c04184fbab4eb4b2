//! Catalog inspection and formatting commands.

use std::fmt::Write as _;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, bail};
use tracing::info;

use super::ExportKind;
use crate::catalog::{self, Catalog, projection};

fn load(path: &Path) -> anyhow::Result<Catalog> {
    catalog::load(path).with_context(|| format!("Failed to load catalog {:?}", path))
}

/// Print albums and their numbered tracks
pub fn cmd_list(path: &Path) -> anyhow::Result<()> {
    let catalog = load(path)?;
    print!("{}", listing(&catalog));
    Ok(())
}

/// Validate the descriptor; any error becomes a non-zero exit
pub fn cmd_check(path: &Path) -> anyhow::Result<()> {
    let catalog = load(path)?;
    println!(
        "{:?}: OK ({} albums, {} tracks, {} artists)",
        path,
        catalog.album_count(),
        catalog.track_count(),
        catalog.artists().len()
    );
    Ok(())
}

/// Print the JSON projection
pub fn cmd_export(
    path: &Path,
    kind: ExportKind,
    album: Option<usize>,
    pretty: bool,
) -> anyhow::Result<()> {
    let catalog = load(path)?;
    println!("{}", export_json(&catalog, kind, album, pretty)?);
    Ok(())
}

/// Re-serialize the descriptor with canonical line endings
pub fn cmd_format(path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let catalog = load(path)?;
    match output {
        Some(out) => {
            let file = std::fs::File::create(out)
                .with_context(|| format!("Failed to create {:?}", out))?;
            let mut writer = BufWriter::new(file);
            catalog::write_catalog(&catalog, &mut writer)
                .and_then(|()| writer.flush())
                .with_context(|| format!("Failed to write {:?}", out))?;
            info!("Wrote {} albums to {:?}", catalog.album_count(), out);
        }
        None => print!("{}", catalog::writer::to_descriptor_string(&catalog)),
    }
    Ok(())
}

fn listing(catalog: &Catalog) -> String {
    let mut out = String::new();
    for (a, album) in catalog.albums().iter().enumerate() {
        let _ = writeln!(out, "[{}] {} - {}", a, album.artist(), album.title());
        for (t, track) in album.tracks().iter().enumerate() {
            let _ = writeln!(out, "    {:>2}. {}", t + 1, track.name());
        }
    }
    out
}

fn export_json(
    catalog: &Catalog,
    kind: ExportKind,
    album: Option<usize>,
    pretty: bool,
) -> anyhow::Result<String> {
    if let Some(index) = album.filter(|&i| catalog.album(i).is_none()) {
        bail!(
            "Album {} does not exist (catalog has {})",
            index,
            catalog.album_count()
        );
    }

    let value = match (kind, album) {
        (ExportKind::Albums, None) => serde_json::to_value(projection::albums(catalog))?,
        (ExportKind::Albums, Some(index)) => {
            serde_json::to_value(projection::albums(catalog).swap_remove(index))?
        }
        (ExportKind::Tracks, album) => {
            let tracks: Vec<_> = projection::tracks(catalog)
                .into_iter()
                .filter(|t| album.is_none_or(|a| t.album_id == a))
                .collect();
            serde_json::to_value(tracks)?
        }
        (ExportKind::Artists, None) => serde_json::to_value(projection::artists(catalog))?,
        (ExportKind::Artists, Some(_)) => bail!("--album does not apply to artists"),
    };

    Ok(if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    })
}
