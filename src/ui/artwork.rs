//! Album artwork as a single averaged colour.

use std::path::Path;

use iced::Color;

use crate::catalog::Catalog;

/// Longest side the image is shrunk to before averaging.
const SAMPLE_SIZE: u32 = 32;

/// One swatch per album, in catalog order. Unreadable artwork is `None`.
pub fn load_swatches(catalog: &Catalog, base: &Path) -> Vec<Option<Color>> {
    catalog
        .albums()
        .iter()
        .map(|album| {
            let path = album.artwork().resolve(base);
            match swatch(&path) {
                Ok(color) => Some(color),
                Err(e) => {
                    tracing::warn!(target: "ui::artwork", "No artwork for {:?}: {}", album.title(), e);
                    None
                }
            }
        })
        .collect()
}

fn swatch(path: &Path) -> Result<Color, image::ImageError> {
    let image = image::open(path)?
        .thumbnail(SAMPLE_SIZE, SAMPLE_SIZE)
        .into_rgba8();
    Ok(average(image.pixels().map(|p| p.0)))
}

/// Alpha-weighted mean of RGBA pixels; fully transparent input is black.
fn average(pixels: impl Iterator<Item = [u8; 4]>) -> Color {
    let (mut r, mut g, mut b, mut weight) = (0u64, 0u64, 0u64, 0u64);
    for [pr, pg, pb, pa] in pixels {
        let a = u64::from(pa);
        r += u64::from(pr) * a;
        g += u64::from(pg) * a;
        b += u64::from(pb) * a;
        weight += a;
    }
    if weight == 0 {
        return Color::BLACK;
    }
    let channel = |sum: u64| (sum as f64 / weight as f64 / 255.0) as f32;
    Color::from_rgb(channel(r), channel(g), channel(b))
}
