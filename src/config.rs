//! Simulation configuration
//!
//! Every section has defaults matching the stock oval track and car, and every
//! field is `#[serde(default)]`, so a JSON file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::car::CarParams;
use crate::sim::rect::Rect;

/// Track geometry: outer boundary minus inner hole, shared corner radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub outer_rect: Rect,
    pub inner_rect: Rect,
    pub corner_radius: f32,
    /// Stroke width for the boundary lines (rendering only)
    pub edge_width: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            outer_rect: Rect::new(140.0, 80.0, 820.0, 540.0),
            inner_rect: Rect::new(260.0, 180.0, 580.0, 340.0),
            corner_radius: 170.0,
            edge_width: 3.0,
        }
    }
}

/// Spawn pose, restored on every reset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub x: f32,
    pub y: f32,
    pub heading_rad: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            x: 200.0,
            y: 350.0,
            // Facing down the screen
            heading_rad: std::f32::consts::FRAC_PI_2,
        }
    }
}

/// Raycast fan settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub n_rays: usize,
    pub fov_deg: f32,
    pub max_dist: f32,
    /// March increment along each ray
    pub step: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            n_rays: DEFAULT_N_RAYS,
            fov_deg: DEFAULT_FOV_DEG,
            max_dist: DEFAULT_RAY_MAX_DIST,
            step: DEFAULT_RAY_STEP,
        }
    }
}

/// Step/reset adapter settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Fixed timestep per `step` call (seconds)
    pub dt: f32,
    /// Episode is truncated after this many steps
    pub max_steps: u32,
    /// Reward per pixel of forward travel
    pub progress_weight: f32,
    /// Subtracted from the reward on the tick the car leaves the track
    pub off_track_penalty: f32,
    /// Remap ray observations from [0, 1] to [-1, 1]
    pub remap_rays: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            dt: ENV_DT,
            max_steps: ENV_MAX_STEPS,
            progress_weight: 0.01,
            off_track_penalty: 5.0,
            remap_rays: true,
        }
    }
}

impl EnvConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::InvalidEnv {
                field: "dt",
                value: self.dt,
            });
        }
        if !self.progress_weight.is_finite() {
            return Err(ConfigError::InvalidEnv {
                field: "progress_weight",
                value: self.progress_weight,
            });
        }
        if !self.off_track_penalty.is_finite() {
            return Err(ConfigError::InvalidEnv {
                field: "off_track_penalty",
                value: self.off_track_penalty,
            });
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub car: CarParams,
    pub track: TrackConfig,
    pub spawn: SpawnConfig,
    pub sensor: SensorConfig,
    pub env: EnvConfig,
}

impl GameConfig {
    /// Parse from a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
