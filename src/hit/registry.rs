use super::{Action, Rect, RegionGroup};

/// Scales probed when the real window scale is unknown, largest first.
pub const CANDIDATE_SCALES: [f32; 5] = [2.0, 1.75, 1.5, 1.25, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub action: Action,
    pub rect: Rect,
}

/// A resolved click: the action and the scale it matched at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub action: Action,
    pub scale: f32,
}

/// Regions registered during the current frame.
#[derive(Debug, Clone, Default)]
pub struct RegionRegistry {
    regions: Vec<Region>,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget last frame's regions.
    pub fn begin_frame(&mut self) {
        self.regions.clear();
    }

    /// Add a region in logical coordinates. Overlaps are kept.
    pub fn register(&mut self, action: Action, x: f32, y: f32, width: f32, height: f32) {
        self.regions.push(Region {
            action,
            rect: Rect::new(x, y, width, height),
        });
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Probe a window-space click against every candidate scale.
    ///
    /// Groups are tried in priority order; within a group scales go from
    /// largest to smallest, and regions in registration order.
    pub fn resolve(&self, x: f32, y: f32) -> Option<Hit> {
        RegionGroup::PRIORITY.iter().find_map(|&group| {
            CANDIDATE_SCALES.iter().find_map(|&scale| {
                self.in_group(group)
                    .find(|r| r.rect.scaled(scale).contains(x, y))
                    .map(|r| Hit {
                        action: r.action,
                        scale,
                    })
            })
        })
    }

    /// Resolve with a known window-to-logical scale: one transform, then
    /// a plain containment test in logical space.
    pub fn resolve_at_scale(&self, x: f32, y: f32, scale: f32) -> Option<Hit> {
        let (lx, ly) = (x / scale, y / scale);
        RegionGroup::PRIORITY.iter().find_map(|&group| {
            self.in_group(group)
                .find(|r| r.rect.contains(lx, ly))
                .map(|r| Hit {
                    action: r.action,
                    scale,
                })
        })
    }

    fn in_group(&self, group: RegionGroup) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(move |r| r.action.group() == group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::View;

    #[test]
    fn test_empty_registry_resolves_nothing() {
        assert_eq!(RegionRegistry::new().resolve(10.0, 10.0), None);
    }

    #[test]
    fn test_transport_matches_at_largest_scale_first() {
        let mut registry = RegionRegistry::new();
        registry.register(Action::SelectAlbum(0), 0.0, 0.0, 400.0, 400.0);
        registry.register(Action::PlayPause, 100.0, 100.0, 20.0, 20.0);

        let hit = registry.resolve(220.0, 220.0).unwrap();
        assert_eq!(hit.action, Action::PlayPause);
        assert_eq!(hit.scale, 2.0);
    }

    #[test]
    fn test_larger_scale_wins_within_group() {
        // Album 0 contains the click at 1.0, album 1 only at 2.0
        let mut registry = RegionRegistry::new();
        registry.register(Action::SelectAlbum(0), 100.0, 100.0, 10.0, 10.0);
        registry.register(Action::SelectAlbum(1), 50.0, 50.0, 10.0, 10.0);
        let hit = registry.resolve(105.0, 105.0).unwrap();
        assert_eq!(hit.action, Action::SelectAlbum(1));
        assert_eq!(hit.scale, 2.0);
    }

    #[test]
    fn test_unscaled_match_when_no_larger_scale_fits() {
        let mut registry = RegionRegistry::new();
        registry.register(Action::SelectAlbum(0), 50.0, 50.0, 10.0, 10.0);
        registry.register(Action::SelectAlbum(1), 100.0, 100.0, 20.0, 20.0);
        let hit = registry.resolve(55.0, 55.0).unwrap();
        assert_eq!(hit.action, Action::SelectAlbum(0));
        assert_eq!(hit.scale, 1.0);
    }

    #[test]
    fn test_registration_order_breaks_ties() {
        let mut registry = RegionRegistry::new();
        registry.register(Action::PlayTrack { album: 0, track: 0 }, 0.0, 0.0, 50.0, 50.0);
        registry.register(Action::PlayTrack { album: 0, track: 1 }, 0.0, 0.0, 50.0, 50.0);
        let hit = registry.resolve(10.0, 10.0).unwrap();
        assert_eq!(hit.action, Action::PlayTrack { album: 0, track: 0 });
    }

    #[test]
    fn test_sidebar_beats_content() {
        let mut registry = RegionRegistry::new();
        registry.register(Action::SelectAlbum(0), 0.0, 0.0, 1000.0, 1000.0);
        registry.register(Action::ShowView(View::Songs), 15.0, 170.0, 170.0, 30.0);
        let hit = registry.resolve(20.0, 175.0).unwrap();
        assert_eq!(hit.action, Action::ShowView(View::Songs));
        assert_eq!(hit.scale, 1.0);
    }

    #[test]
    fn test_miss_is_none() {
        let mut registry = RegionRegistry::new();
        registry.register(Action::Next, 10.0, 10.0, 5.0, 5.0);
        assert_eq!(registry.resolve(500.0, 500.0), None);
    }

    #[test]
    fn test_begin_frame_clears() {
        let mut registry = RegionRegistry::new();
        registry.register(Action::Next, 10.0, 10.0, 5.0, 5.0);
        registry.begin_frame();
        assert!(registry.regions().is_empty());
        assert_eq!(registry.resolve(12.0, 12.0), None);
    }

    #[test]
    fn test_resolve_at_scale_transforms_point() {
        let mut registry = RegionRegistry::new();
        registry.register(Action::PlayPause, 100.0, 100.0, 20.0, 20.0);
        assert_eq!(
            registry.resolve_at_scale(150.0, 150.0, 1.5).map(|h| h.action),
            Some(Action::PlayPause)
        );
        assert_eq!(registry.resolve_at_scale(220.0, 220.0, 1.0), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn action() -> impl Strategy<Value = Action> {
            prop_oneof![
                Just(Action::PlayPause),
                Just(Action::Previous),
                Just(Action::Next),
                Just(Action::Seek),
                prop::sample::select(View::SIDEBAR.to_vec()).prop_map(Action::ShowView),
                (0usize..8).prop_map(Action::SelectAlbum),
                (0usize..8, 0usize..8).prop_map(|(album, track)| Action::PlayTrack { album, track }),
            ]
        }

        fn region() -> impl Strategy<Value = (Action, f32, f32, f32, f32)> {
            (action(), 0.0f32..800.0, 0.0f32..800.0, 1.0f32..200.0, 1.0f32..200.0)
        }

        fn registry(regions: &[(Action, f32, f32, f32, f32)]) -> RegionRegistry {
            let mut registry = RegionRegistry::new();
            for &(action, x, y, w, h) in regions {
                registry.register(action, x, y, w, h);
            }
            registry
        }

        proptest! {
            #[test]
            fn resolve_is_deterministic(
                regions in prop::collection::vec(region(), 0..12),
                x in 0.0f32..2000.0,
                y in 0.0f32..2000.0,
            ) {
                let registry = registry(&regions);
                prop_assert_eq!(registry.resolve(x, y), registry.resolve(x, y));
            }

            /// A hit always names the highest-priority group that can match,
            /// and within it no larger scale would have matched.
            #[test]
            fn hit_respects_group_then_scale(
                regions in prop::collection::vec(region(), 1..12),
                x in 0.0f32..2000.0,
                y in 0.0f32..2000.0,
            ) {
                let registry = registry(&regions);
                let any_match = |group: RegionGroup, scale: f32| {
                    registry
                        .regions()
                        .iter()
                        .any(|r| r.action.group() == group && r.rect.scaled(scale).contains(x, y))
                };
                if let Some(hit) = registry.resolve(x, y) {
                    let group = hit.action.group();
                    for &earlier in RegionGroup::PRIORITY.iter().filter(|g| **g < group) {
                        for &scale in &CANDIDATE_SCALES {
                            prop_assert!(!any_match(earlier, scale));
                        }
                    }
                    for &scale in CANDIDATE_SCALES.iter().filter(|s| **s > hit.scale) {
                        prop_assert!(!any_match(group, scale));
                    }
                } else {
                    for &group in &RegionGroup::PRIORITY {
                        for &scale in &CANDIDATE_SCALES {
                            prop_assert!(!any_match(group, scale));
                        }
                    }
                }
            }
        }
    }
}
