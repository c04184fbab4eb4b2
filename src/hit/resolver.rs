use serde::{Deserialize, Serialize};

use super::{Hit, RegionRegistry};

/// How window coordinates are related to logical ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleStrategy {
    /// Scale unknown: probe the candidate list.
    Probe,
    /// The renderer reported the window-to-logical ratio.
    Exact(f32),
}

/// Config-level choice between the two strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitTesting {
    #[default]
    Exact,
    Probe,
}

/// Maps window-space clicks to actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResolver {
    strategy: ScaleStrategy,
}

impl HitResolver {
    pub fn new(strategy: ScaleStrategy) -> Self {
        Self { strategy }
    }

    pub fn from_mode(mode: HitTesting) -> Self {
        match mode {
            HitTesting::Exact => Self::new(ScaleStrategy::Exact(1.0)),
            HitTesting::Probe => Self::new(ScaleStrategy::Probe),
        }
    }

    pub fn strategy(&self) -> ScaleStrategy {
        self.strategy
    }

    /// Record the renderer's current scale. Ignored when probing, and for
    /// non-positive or non-finite values.
    pub fn set_window_scale(&mut self, scale: f32) {
        if !scale.is_finite() || scale <= 0.0 {
            return;
        }
        if let ScaleStrategy::Exact(current) = &mut self.strategy {
            *current = scale;
        }
    }

    /// Resolve a window-space click. The hit carries the scale it matched
    /// at, so callers can map the point into the region's logical space.
    pub fn resolve(&self, registry: &RegionRegistry, x: f32, y: f32) -> Option<Hit> {
        let hit = match self.strategy {
            ScaleStrategy::Probe => registry.resolve(x, y),
            ScaleStrategy::Exact(scale) => registry.resolve_at_scale(x, y, scale),
        };
        match hit {
            Some(hit) => {
                tracing::debug!(target: "ui::hit", "Click ({}, {}) -> {:?} at scale {}", x, y, hit.action, hit.scale);
                Some(hit)
            }
            None => {
                tracing::trace!(target: "ui::hit", "Click ({}, {}) missed", x, y);
                None
            }
        }
    }

    /// Window point to logical point. Identity when the scale is unknown.
    pub fn to_logical(&self, x: f32, y: f32) -> (f32, f32) {
        match self.strategy {
            ScaleStrategy::Probe => (x, y),
            ScaleStrategy::Exact(scale) => (x / scale, y / scale),
        }
    }
}

impl Default for HitResolver {
    fn default() -> Self {
        Self::from_mode(HitTesting::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::Action;

    fn action_at(resolver: &HitResolver, x: f32, y: f32) -> Option<Action> {
        resolver.resolve(&transport(), x, y).map(|hit| hit.action)
    }

    fn transport() -> RegionRegistry {
        let mut registry = RegionRegistry::new();
        registry.register(Action::SelectAlbum(0), 0.0, 0.0, 400.0, 400.0);
        registry.register(Action::PlayPause, 100.0, 100.0, 20.0, 20.0);
        registry
    }

    #[test]
    fn test_probe_uses_candidate_scales() {
        let resolver = HitResolver::new(ScaleStrategy::Probe);
        assert_eq!(action_at(&resolver, 220.0, 220.0), Some(Action::PlayPause));
        assert_eq!(resolver.resolve(&transport(), 220.0, 220.0).unwrap().scale, 2.0);
    }

    #[test]
    fn test_exact_uses_reported_scale() {
        let mut resolver = HitResolver::default();
        assert_eq!(action_at(&resolver, 220.0, 220.0), Some(Action::SelectAlbum(0)));
        resolver.set_window_scale(2.0);
        assert_eq!(action_at(&resolver, 220.0, 220.0), Some(Action::PlayPause));
        assert_eq!(resolver.to_logical(220.0, 100.0), (110.0, 50.0));
    }

    #[test]
    fn test_invalid_scale_ignored() {
        let mut resolver = HitResolver::default();
        resolver.set_window_scale(0.0);
        resolver.set_window_scale(f32::INFINITY);
        assert_eq!(resolver.strategy(), ScaleStrategy::Exact(1.0));
    }

    #[test]
    fn test_probe_ignores_window_scale() {
        let mut resolver = HitResolver::from_mode(HitTesting::Probe);
        resolver.set_window_scale(1.5);
        assert_eq!(resolver.strategy(), ScaleStrategy::Probe);
        assert_eq!(resolver.to_logical(30.0, 40.0), (30.0, 40.0));
    }

    #[test]
    fn test_mode_serde_lowercase() {
        let mode: HitTesting = serde_json::from_str("\"probe\"").unwrap();
        assert_eq!(mode, HitTesting::Probe);
        assert_eq!(serde_json::to_string(&HitTesting::Exact).unwrap(), "\"exact\"");
    }
}
