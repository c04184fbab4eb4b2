//! Selection state: which album and track are current, and which view
//! the content area shows.

use std::fmt;

use crate::catalog::Catalog;
use crate::scroll::ViewportScroll;

/// The content-area views, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    Playlists,
    Artists,
    #[default]
    Albums,
    Songs,
}

impl View {
    /// Sidebar menu order, top to bottom.
    pub const SIDEBAR: [View; 4] = [View::Playlists, View::Artists, View::Albums, View::Songs];

    pub fn label(self) -> &'static str {
        match self {
            View::Playlists => "Playlists",
            View::Artists => "Artists",
            View::Albums => "Albums",
            View::Songs => "Songs",
        }
    }

    /// Position in [`View::SIDEBAR`], also used to index per-view state.
    pub fn index(self) -> usize {
        match self {
            View::Playlists => 0,
            View::Artists => 1,
            View::Albums => 2,
            View::Songs => 3,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cursor over the catalog.
///
/// Indices are always in bounds for the catalog passed to the mutating
/// methods. Out-of-range requests are contract violations: they assert in
/// debug builds and leave the cursor unchanged otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationCursor {
    selected_album: usize,
    selected_track: usize,
    album_confirmed: bool,
    active_view: View,
}

impl NavigationCursor {
    /// Start at the first track of the first album, unconfirmed, Albums view.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_album(&self) -> usize {
        self.selected_album
    }

    pub fn selected_track(&self) -> usize {
        self.selected_track
    }

    /// `(album, track)`
    pub fn position(&self) -> (usize, usize) {
        (self.selected_album, self.selected_track)
    }

    pub fn album_confirmed(&self) -> bool {
        self.album_confirmed
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn select_album(&mut self, catalog: &Catalog, index: usize) {
        if index >= catalog.album_count() {
            debug_assert!(false, "album index {} out of range", index);
            return;
        }
        self.selected_album = index;
        self.selected_track = 0;
        self.album_confirmed = true;
        self.revalidate(catalog);
        tracing::debug!("Selected album {}", index);
    }

    pub fn select_track(&mut self, catalog: &Catalog, index: usize) {
        let in_range = catalog
            .album(self.selected_album)
            .is_some_and(|a| index < a.tracks().len());
        if !in_range {
            debug_assert!(false, "track index {} out of range", index);
            return;
        }
        self.selected_track = index;
        self.revalidate(catalog);
        tracing::debug!("Selected track {:?}", self.position());
    }

    /// Step back one track, crossing into the previous album's last track.
    /// Returns whether the cursor moved.
    pub fn advance_previous(&mut self, catalog: &Catalog) -> bool {
        if self.selected_track > 0 {
            self.selected_track -= 1;
        } else if self.selected_album > 0 {
            self.selected_album -= 1;
            self.selected_track = catalog
                .album(self.selected_album)
                .map_or(0, |a| a.last_track_index());
        } else {
            return false;
        }
        self.revalidate(catalog);
        tracing::debug!("Cursor back to {:?}", self.position());
        true
    }

    /// Step forward one track, crossing into the next album's first track.
    /// At the very last track of the catalog this is a no-op (no wrap).
    /// Returns whether the cursor moved.
    pub fn advance_next(&mut self, catalog: &Catalog) -> bool {
        let last_track = catalog
            .album(self.selected_album)
            .map_or(0, |a| a.last_track_index());
        if self.selected_track < last_track {
            self.selected_track += 1;
        } else if self.selected_album < catalog.last_album_index() {
            self.selected_album += 1;
            self.selected_track = 0;
        } else {
            return false;
        }
        self.revalidate(catalog);
        tracing::debug!("Cursor forward to {:?}", self.position());
        true
    }

    /// Switch the content view. Every scroll offset goes back to the top.
    pub fn set_view(&mut self, view: View, scroll: &mut ViewportScroll) {
        self.active_view = view;
        scroll.reset_all();
        tracing::debug!("View switched to {}", view);
    }

    /// Pull both indices back into range for `catalog`.
    pub fn revalidate(&mut self, catalog: &Catalog) {
        self.selected_album = self.selected_album.min(catalog.last_album_index());
        let last_track = catalog
            .album(self.selected_album)
            .map_or(0, |a| a.last_track_index());
        self.selected_track = self.selected_track.min(last_track);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{catalog_with_shape, sample_catalog};

    #[test]
    fn test_initial_state() {
        let cursor = NavigationCursor::new();
        assert_eq!(cursor.position(), (0, 0));
        assert!(!cursor.album_confirmed());
        assert_eq!(cursor.active_view(), View::Albums);
    }

    #[test]
    fn test_select_album_resets_track_and_confirms() {
        let catalog = sample_catalog();
        let mut cursor = NavigationCursor::new();
        cursor.select_track(&catalog, 2);
        cursor.select_album(&catalog, 1);
        assert_eq!(cursor.position(), (1, 0));
        assert!(cursor.album_confirmed());
    }

    #[test]
    fn test_next_crosses_album_boundary() {
        let catalog = sample_catalog();
        let mut cursor = NavigationCursor::new();
        cursor.select_track(&catalog, 2);
        assert!(cursor.advance_next(&catalog));
        assert_eq!(cursor.position(), (1, 0));
        assert!(!cursor.advance_next(&catalog));
        assert_eq!(cursor.position(), (1, 0));
    }

    #[test]
    fn test_previous_lands_on_last_track_of_previous_album() {
        let catalog = sample_catalog();
        let mut cursor = NavigationCursor::new();
        cursor.select_album(&catalog, 1);
        assert!(cursor.advance_previous(&catalog));
        assert_eq!(cursor.position(), (0, 2));
    }

    #[test]
    fn test_previous_at_start_is_noop() {
        let catalog = sample_catalog();
        let mut cursor = NavigationCursor::new();
        assert!(!cursor.advance_previous(&catalog));
        assert_eq!(cursor.position(), (0, 0));
    }

    #[test]
    fn test_set_view_resets_scroll() {
        use crate::scroll::ContentExtent;

        let mut cursor = NavigationCursor::new();
        let mut scroll = ViewportScroll::new();
        let extent = ContentExtent::new(20, 48.0, 300.0);
        scroll.scroll_by(View::Songs, 200.0, extent);
        scroll.scroll_by(View::Albums, 100.0, extent);

        cursor.set_view(View::Songs, &mut scroll);
        assert_eq!(cursor.active_view(), View::Songs);
        assert_eq!(scroll.offset(View::Songs), 0.0);
        assert_eq!(scroll.offset(View::Albums), 0.0);
    }

    #[test]
    fn test_revalidate_after_catalog_swap() {
        let big = catalog_with_shape(&[2, 5, 3]);
        let small = catalog_with_shape(&[2]);
        let mut cursor = NavigationCursor::new();
        cursor.select_album(&big, 1);
        cursor.select_track(&big, 4);
        cursor.revalidate(&small);
        assert_eq!(cursor.position(), (0, 1));
    }

    #[test]
    fn test_sidebar_order_matches_index() {
        for (i, view) in View::SIDEBAR.iter().enumerate() {
            assert_eq!(view.index(), i);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_select_album_out_of_range_asserts() {
        let catalog = sample_catalog();
        NavigationCursor::new().select_album(&catalog, 9);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_select_track_out_of_range_asserts() {
        let catalog = sample_catalog();
        let mut cursor = NavigationCursor::new();
        cursor.select_album(&catalog, 1);
        cursor.select_track(&catalog, 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn shape() -> impl Strategy<Value = Vec<usize>> {
            prop::collection::vec(1usize..6, 1..6)
        }

        proptest! {
            /// total-1 steps reach the final track, one more does nothing.
            #[test]
            fn next_walks_whole_catalog(shape in shape()) {
                let catalog = catalog_with_shape(&shape);
                let mut cursor = NavigationCursor::new();
                for _ in 0..catalog.track_count() - 1 {
                    prop_assert!(cursor.advance_next(&catalog));
                }
                let last = (catalog.last_album_index(), shape[shape.len() - 1] - 1);
                prop_assert_eq!(cursor.position(), last);
                prop_assert!(!cursor.advance_next(&catalog));
                prop_assert_eq!(cursor.position(), last);
            }

            /// Previous undoes the next step that reached any position.
            #[test]
            fn previous_inverts_next(shape in shape(), steps in 0usize..30) {
                let catalog = catalog_with_shape(&shape);
                let mut cursor = NavigationCursor::new();
                for _ in 0..steps {
                    let before = cursor.position();
                    if !cursor.advance_next(&catalog) {
                        break;
                    }
                    let mut back = cursor.clone();
                    prop_assert!(back.advance_previous(&catalog));
                    prop_assert_eq!(back.position(), before);
                }
            }

            #[test]
            fn select_album_always_resets(shape in shape(), pick in any::<prop::sample::Index>(), track in 0usize..6) {
                let catalog = catalog_with_shape(&shape);
                let mut cursor = NavigationCursor::new();
                let first = catalog.album(0).unwrap().last_track_index();
                cursor.select_track(&catalog, track.min(first));
                let i = pick.index(catalog.album_count());
                cursor.select_album(&catalog, i);
                prop_assert_eq!(cursor.position(), (i, 0));
                prop_assert!(cursor.album_confirmed());
            }
        }
    }
}
