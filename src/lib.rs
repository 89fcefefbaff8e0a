//! Track Racer - a single car on a rounded-rectangle ring track
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, car dynamics, raycast sensor, env)
//! - `config`: Data-driven track, car and sensor settings
//! - `policy`: Built-in drivers for the step/reset environment
//! - `hud`: Read-only render snapshot

pub mod config;
pub mod error;
pub mod hud;
pub mod policy;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, InputError};

/// Simulation constants
pub mod consts {
    /// Fixed step for the learning environment (30 Hz)
    pub const ENV_DT: f32 = 1.0 / 30.0;
    /// Steps before an env episode is truncated
    pub const ENV_MAX_STEPS: u32 = 2000;

    /// Sensor defaults
    pub const DEFAULT_N_RAYS: usize = 9;
    pub const DEFAULT_FOV_DEG: f32 = 180.0;
    pub const DEFAULT_RAY_MAX_DIST: f32 = 350.0;
    pub const DEFAULT_RAY_STEP: f32 = 6.0;
}

/// Heading in degrees wrapped to [0, 360)
#[inline]
pub fn heading_degrees(heading: f32) -> f32 {
    let deg = heading.to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negatives
    if deg >= 360.0 { 0.0 } else { deg }
}
