//! One car on one track, advanced tick by tick
//!
//! Per tick: input -> car step -> off-track check -> (on demand) ray scan.
//! The world also keeps the episode accumulators the caller reads for logging
//! and rewards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::car::{Car, InputSource};
use super::observation::Observation;
use super::sensor::{RayFan, RayScan};
use super::track::Track;
use crate::config::GameConfig;
use crate::error::ConfigError;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Car centre left the drivable ring
    pub off_track: bool,
    /// Distance moved this tick
    pub displacement: f32,
}

/// Accumulators for the current episode
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EpisodeStats {
    /// Sum of per-tick Euclidean displacement (pixels)
    pub travelled_distance: f32,
    /// Simulated seconds since the last reset
    pub elapsed: f32,
    pub ticks: u64,
}

#[derive(Debug, Clone)]
pub struct World {
    track: Track,
    sensor: RayFan,
    pub car: Car,
    pub stats: EpisodeStats,
}

impl World {
    /// Build and validate everything the tick loop needs
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let track = Track::from_config(&config.track)?;
        let sensor = RayFan::from_config(&config.sensor)?;
        config.car.validate()?;

        let spawn = config.spawn;
        if !track.on_track(Vec2::new(spawn.x, spawn.y)) {
            return Err(ConfigError::SpawnOffTrack {
                x: spawn.x,
                y: spawn.y,
            });
        }

        Ok(Self::from_parts(track, sensor, Car::new(config.car, spawn)))
    }

    pub fn from_parts(track: Track, sensor: RayFan, car: Car) -> Self {
        Self {
            track,
            sensor,
            car,
            stats: EpisodeStats::default(),
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn sensor(&self) -> &RayFan {
        &self.sensor
    }

    /// Step the car and check the boundary. Does not reset on its own.
    pub fn tick(&mut self, input: &InputSource, dt: f32) -> TickOutcome {
        let before = self.car.position();
        self.car.step(input, dt);
        let after = self.car.position();

        let displacement = before.distance(after);
        self.stats.travelled_distance += displacement;
        self.stats.elapsed += dt;
        self.stats.ticks += 1;

        TickOutcome {
            off_track: !self.track.on_track(after),
            displacement,
        }
    }

    /// Car back to spawn, accumulators cleared
    pub fn reset(&mut self) {
        self.car.reset();
        self.stats = EpisodeStats::default();
    }

    pub fn on_track(&self) -> bool {
        self.track.on_track(self.car.position())
    }

    pub fn scan(&self) -> RayScan {
        self.sensor.cast(&self.track, &self.car.state)
    }

    pub fn observation(&self, remap_rays: bool) -> Observation {
        Observation::new(&self.scan(), &self.car.state, self.car.params(), remap_rays)
    }
}
