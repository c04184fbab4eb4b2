//! Colours for the shelf window.
//!
//! Scenes carry [`Paint`] roles; this is the only place they become
//! concrete colours.

use iced::Color;

use crate::app::Paint;

pub mod color {
    use super::*;

    /// Content background
    /// Hex: #2b2d3a
    pub const BACKGROUND: Color = Color::from_rgb(
        0x2b as f32 / 255.0,
        0x2d as f32 / 255.0,
        0x3a as f32 / 255.0,
    );

    /// Sidebar panel
    /// Hex: #23252f
    pub const SIDEBAR: Color = Color::from_rgb(
        0x23 as f32 / 255.0,
        0x25 as f32 / 255.0,
        0x2f as f32 / 255.0,
    );

    /// Album cards and list rows, also the artwork fallback
    /// Hex: #353747
    pub const CARD: Color = Color::from_rgb(
        0x35 as f32 / 255.0,
        0x37 as f32 / 255.0,
        0x47 as f32 / 255.0,
    );

    /// Hex: #4b4d5e
    pub const PLAYER_BAR: Color = Color::from_rgb(
        0x4b as f32 / 255.0,
        0x4d as f32 / 255.0,
        0x5e as f32 / 255.0,
    );

    pub const TEXT_PRIMARY: Color = Color::WHITE;

    /// Hex: #9a9aa6
    pub const TEXT_SECONDARY: Color = Color::from_rgb(
        0x9a as f32 / 255.0,
        0x9a as f32 / 255.0,
        0xa6 as f32 / 255.0,
    );

    /// Selection and the active play button
    /// Hex: #ff2d55
    pub const ACCENT: Color = Color::from_rgb(
        0xff as f32 / 255.0,
        0x2d as f32 / 255.0,
        0x55 as f32 / 255.0,
    );
}

/// Resolve a paint role. Artwork falls back to the card colour when its
/// swatch is missing.
pub fn paint(role: Paint, swatches: &[Option<Color>]) -> Color {
    match role {
        Paint::Background => color::BACKGROUND,
        Paint::Sidebar => color::SIDEBAR,
        Paint::Card => color::CARD,
        Paint::PlayerBar => color::PLAYER_BAR,
        Paint::TextPrimary => color::TEXT_PRIMARY,
        Paint::TextSecondary => color::TEXT_SECONDARY,
        Paint::Accent => color::ACCENT,
        Paint::Artwork(album) => swatches.get(album).copied().flatten().unwrap_or(color::CARD),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artwork_falls_back_to_card() {
        let red = Color::from_rgb(1.0, 0.0, 0.0);
        let swatches = [Some(red), None];
        assert_eq!(paint(Paint::Artwork(0), &swatches), red);
        assert_eq!(paint(Paint::Artwork(1), &swatches), color::CARD);
        assert_eq!(paint(Paint::Artwork(7), &swatches), color::CARD);
    }

    #[test]
    fn test_fixed_roles() {
        assert_eq!(paint(Paint::Accent, &[]), color::ACCENT);
        assert_eq!(paint(Paint::Sidebar, &[]), color::SIDEBAR);
    }
}
