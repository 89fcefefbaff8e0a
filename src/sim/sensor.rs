//! Raycast range sensor
//!
//! Fixed-step ray marching against `Track::on_track`. Accuracy is bounded by the
//! march step; each ray costs at most `ceil(max_dist / step)` containment tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::car::CarState;
use super::track::Track;
use crate::config::SensorConfig;
use crate::error::ConfigError;

/// One ray of a scan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaySample {
    /// Offset from the car heading (radians), negative = left of the fan
    pub angle_offset: f32,
    /// Distance to the first off-track sample, or `max_dist`
    pub distance: f32,
}

/// Validated fan of rays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayFan {
    n_rays: usize,
    fov: f32,
    max_dist: f32,
    step: f32,
}

impl RayFan {
    /// `fov_deg` is the full opening angle in degrees
    pub fn new(n_rays: usize, fov_deg: f32, max_dist: f32, step: f32) -> Result<Self, ConfigError> {
        if !fov_deg.is_finite() {
            return Err(ConfigError::InvalidSensor {
                field: "fov_deg",
                value: fov_deg,
            });
        }
        if !(max_dist.is_finite() && max_dist > 0.0) {
            return Err(ConfigError::InvalidSensor {
                field: "max_dist",
                value: max_dist,
            });
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(ConfigError::InvalidSensor {
                field: "step",
                value: step,
            });
        }
        Ok(Self {
            n_rays,
            fov: fov_deg.to_radians(),
            max_dist,
            step,
        })
    }

    pub fn from_config(config: &SensorConfig) -> Result<Self, ConfigError> {
        Self::new(config.n_rays, config.fov_deg, config.max_dist, config.step)
    }

    pub fn n_rays(&self) -> usize {
        self.n_rays
    }

    pub fn max_dist(&self) -> f32 {
        self.max_dist
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Angle offset of ray `i`, evenly spread over `[-fov/2, fov/2]`
    pub fn angle_offset(&self, i: usize) -> f32 {
        if self.n_rays <= 1 {
            return 0.0;
        }
        let half = self.fov * 0.5;
        let t = i as f32 / (self.n_rays - 1) as f32;
        -half + t * self.fov
    }

    /// Number of sample points along one ray, `ceil(max_dist / step)`
    pub fn samples_per_ray(&self) -> u64 {
        (self.max_dist / self.step).ceil() as u64
    }

    /// March a single ray from `origin` along world angle `angle`
    pub fn march(&self, track: &Track, origin: Vec2, angle: f32) -> f32 {
        let dir = Vec2::new(angle.cos(), angle.sin());
        // Sample distances come from an integer index; summing `step` into an
        // f32 stalls once `dist + step == dist`.
        for i in 0..self.samples_per_ray() {
            let dist = i as f32 * self.step;
            if dist >= self.max_dist {
                break;
            }
            if !track.on_track(origin + dir * dist) {
                return dist;
            }
        }
        self.max_dist
    }

    /// Scan the whole fan from the car's pose
    pub fn cast(&self, track: &Track, pose: &CarState) -> RayScan {
        let mut samples = Vec::with_capacity(self.n_rays);
        self.cast_into(track, pose, &mut samples);
        RayScan {
            samples,
            max_dist: self.max_dist,
        }
    }

    /// Like [`RayFan::cast`] but reuses `out` (cleared first)
    pub fn cast_into(&self, track: &Track, pose: &CarState, out: &mut Vec<RaySample>) {
        out.clear();
        let origin = pose.position();
        out.extend((0..self.n_rays).map(|i| {
            let angle_offset = self.angle_offset(i);
            RaySample {
                angle_offset,
                distance: self.march(track, origin, pose.heading + angle_offset),
            }
        }));
    }
}

/// Result of one fan scan, ordered left to right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayScan {
    pub samples: Vec<RaySample>,
    pub max_dist: f32,
}

impl RayScan {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Raw distances in pixels
    pub fn distances(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().map(|s| s.distance)
    }

    /// Distances scaled into [0, 1]
    pub fn normalized(&self) -> impl Iterator<Item = f32> + '_ {
        let max = self.max_dist;
        self.samples.iter().map(move |s| s.distance / max)
    }

    /// World-space (start, end) segments for drawing
    pub fn endpoints(&self, pose: &CarState) -> Vec<(Vec2, Vec2)> {
        let origin = pose.position();
        self.samples
            .iter()
            .map(|s| {
                let angle = pose.heading + s.angle_offset;
                (origin, origin + Vec2::new(angle.cos(), angle.sin()) * s.distance)
            })
            .collect()
    }
}
