//! Rounded-rectangle ring track
//!
//! The drivable surface is the outer rounded rectangle minus the inner one.

use glam::Vec2;

use super::rect::{Rect, RoundedRect};
use crate::config::TrackConfig;
use crate::error::ConfigError;

/// Immutable track geometry, cheap to clone and share between instances
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    outer: RoundedRect,
    inner: RoundedRect,
    /// Boundary stroke width, only meaningful to a renderer
    edge_width: f32,
}

impl Track {
    /// Build a track, rejecting geometry that cannot form a drivable ring
    pub fn new(outer: Rect, inner: Rect, corner_radius: f32, edge_width: f32) -> Result<Self, ConfigError> {
        check_size("outer", &outer)?;
        check_size("inner", &inner)?;

        if !corner_radius.is_finite() || corner_radius < 0.0 {
            return Err(ConfigError::InvalidRadius(corner_radius));
        }

        let outer = RoundedRect::new(outer, corner_radius);
        let inner = RoundedRect::new(inner, corner_radius);
        for (name, shape) in [("outer", &outer), ("inner", &inner)] {
            if !shape.is_well_formed() {
                return Err(ConfigError::DegenerateCorner {
                    name,
                    radius: corner_radius,
                    width: shape.rect.width,
                    height: shape.rect.height,
                });
            }
        }

        if !outer.rect.strictly_contains_rect(&inner.rect) {
            return Err(ConfigError::NotNested);
        }

        Ok(Self {
            outer,
            inner,
            edge_width,
        })
    }

    pub fn from_config(config: &TrackConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.outer_rect,
            config.inner_rect,
            config.corner_radius,
            config.edge_width,
        )
    }

    /// True if `p` is on the drivable ring
    #[inline]
    pub fn on_track(&self, p: Vec2) -> bool {
        self.outer.contains(p) && !self.inner.contains(p)
    }

    pub fn outer(&self) -> &RoundedRect {
        &self.outer
    }

    pub fn inner(&self) -> &RoundedRect {
        &self.inner
    }

    pub fn corner_radius(&self) -> f32 {
        self.outer.radius
    }

    pub fn edge_width(&self) -> f32 {
        self.edge_width
    }
}

fn check_size(name: &'static str, rect: &Rect) -> Result<(), ConfigError> {
    let finite = rect.x.is_finite() && rect.y.is_finite() && rect.width.is_finite() && rect.height.is_finite();
    if !finite || rect.width <= 0.0 || rect.height <= 0.0 {
        return Err(ConfigError::EmptyRect {
            name,
            width: rect.width,
            height: rect.height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_track() -> Track {
        Track::from_config(&TrackConfig::default()).unwrap()
    }

    #[test]
    fn test_default_track_scenario() {
        let track = default_track();
        // Spawn point
        assert!(track.on_track(Vec2::new(200.0, 350.0)));
        // Outside the outer boundary
        assert!(!track.on_track(Vec2::new(0.0, 0.0)));
        // Centre of the inner hole
        assert!(!track.on_track(Vec2::new(500.0, 350.0)));
    }

    #[test]
    fn test_ring_regions() {
        let track = default_track();
        // Straight sections between the two boundaries
        assert!(track.on_track(Vec2::new(550.0, 130.0)));
        assert!(track.on_track(Vec2::new(550.0, 570.0)));
        assert!(track.on_track(Vec2::new(900.0, 350.0)));
        // Inner core strip
        assert!(!track.on_track(Vec2::new(430.0, 350.0)));
        assert!(!track.on_track(Vec2::new(670.0, 350.0)));
        // Cut-off outer corner
        assert!(!track.on_track(Vec2::new(145.0, 85.0)));
        // Far beyond
        assert!(!track.on_track(Vec2::new(2000.0, 350.0)));
    }

    #[test]
    fn test_rejects_unnested_inner() {
        let err = Track::new(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(50.0, 10.0, 80.0, 50.0),
            10.0,
            3.0,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NotNested));

        // Touching edges is not strictly inside either
        let err = Track::new(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(0.0, 20.0, 50.0, 50.0),
            10.0,
            3.0,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NotNested));
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(30.0, 30.0, 40.0, 40.0);

        assert!(matches!(
            Track::new(outer, Rect::new(30.0, 30.0, 0.0, 40.0), 5.0, 1.0),
            Err(ConfigError::EmptyRect { name: "inner", .. })
        ));
        assert!(matches!(
            Track::new(outer, inner, -1.0, 1.0),
            Err(ConfigError::InvalidRadius(_))
        ));
        assert!(matches!(
            Track::new(outer, inner, f32::NAN, 1.0),
            Err(ConfigError::InvalidRadius(_))
        ));
        // Radius 25 collapses the 40x40 inner rectangle
        assert!(matches!(
            Track::new(outer, inner, 25.0, 1.0),
            Err(ConfigError::DegenerateCorner { name: "inner", .. })
        ));
        assert!(Track::new(outer, inner, 20.0, 1.0).is_ok());
    }

    #[test]
    fn test_edge_width_does_not_affect_containment() {
        let config = TrackConfig::default();
        let thin = Track::new(config.outer_rect, config.inner_rect, config.corner_radius, 1.0).unwrap();
        let thick = Track::new(config.outer_rect, config.inner_rect, config.corner_radius, 40.0).unwrap();
        assert_eq!(thick.edge_width(), 40.0);
        assert_eq!(thick.corner_radius(), 170.0);
        assert_eq!(thick.outer(), thin.outer());
        for x in (0..1100).step_by(37) {
            for y in (0..700).step_by(29) {
                let p = Vec2::new(x as f32, y as f32);
                assert_eq!(thin.on_track(p), thick.on_track(p));
            }
        }
    }
}
