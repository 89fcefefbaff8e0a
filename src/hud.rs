//! Read-only render snapshot
//!
//! Everything a renderer needs to draw one frame. Nothing here draws.

use glam::Vec2;
use serde::Serialize;

use crate::heading_degrees;
use crate::sim::car::CarState;
use crate::sim::world::World;

/// Frame snapshot for a renderer or debug dump
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub state: CarState,
    /// Car body corners, world space
    pub footprint: [Vec2; 4],
    /// Heading indicator (centre, nose)
    pub nose: (Vec2, Vec2),
    /// Ray segments, left to right
    pub rays: Vec<(Vec2, Vec2)>,
    pub hud: String,
}

impl RenderSnapshot {
    pub fn capture(world: &World) -> Self {
        let car = &world.car;
        let scan = world.scan();
        Self {
            state: car.state,
            footprint: car.footprint(),
            nose: car.nose(),
            rays: scan.endpoints(&car.state),
            hud: hud_line(&car.state),
        }
    }
}

/// Status line shown at the top of the manual-drive window
pub fn hud_line(state: &CarState) -> String {
    format!(
        "speed={:7.1}  heading={:6.1}°  (WASD drive, R reset, ESC quit)",
        state.speed,
        heading_degrees(state.heading)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_hud_line_format() {
        let state = CarState {
            x: 0.0,
            y: 0.0,
            heading: -std::f32::consts::FRAC_PI_2,
            speed: 12.34,
        };
        assert_eq!(
            hud_line(&state),
            "speed=   12.3  heading= 270.0°  (WASD drive, R reset, ESC quit)"
        );
    }

    #[test]
    fn test_capture_default_world() {
        let world = World::new(&GameConfig::default()).unwrap();
        let snap = RenderSnapshot::capture(&world);
        assert_eq!(snap.rays.len(), 9);
        assert_eq!(snap.nose.0, Vec2::new(200.0, 350.0));
        assert!(snap.rays.iter().all(|(start, _)| *start == snap.nose.0));
        assert!(snap.hud.starts_with("speed=    0.0  heading=  90.0°"));
    }
}
