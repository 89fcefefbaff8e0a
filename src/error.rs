//! Error types
//!
//! The simulation itself never fails: control values are clamped and degenerate
//! geometry falls back to a plain rectangle. Errors only surface while building
//! a world from configuration, or when an action vector has the wrong shape.

use std::path::PathBuf;

/// Rejected configuration (fails construction, never a running tick)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} rectangle must have a finite positive size, got {width}x{height}")]
    EmptyRect {
        name: &'static str,
        width: f32,
        height: f32,
    },

    #[error("corner radius must be finite and non-negative, got {0}")]
    InvalidRadius(f32),

    #[error("corner radius {radius} collapses the {name} rectangle ({width}x{height})")]
    DegenerateCorner {
        name: &'static str,
        radius: f32,
        width: f32,
        height: f32,
    },

    #[error("inner rectangle is not strictly inside the outer rectangle")]
    NotNested,

    #[error("spawn point ({x}, {y}) is off the track")]
    SpawnOffTrack { x: f32, y: f32 },

    #[error("invalid sensor setting `{field}`: {value}")]
    InvalidSensor { field: &'static str, value: f32 },

    #[error("invalid car parameter `{field}`: {value}")]
    InvalidCarParam { field: &'static str, value: f32 },

    #[error("invalid environment setting `{field}`: {value}")]
    InvalidEnv { field: &'static str, value: f32 },

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Malformed action handed to the environment adapter
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("action must have {expected} components [steer, throttle, brake], got {got}")]
    ActionShape { expected: usize, got: usize },
    #[error("observation with {n_rays} rays needs {expected} values, got {got}")]
    ObservationShape { n_rays: usize, expected: usize, got: usize },
}
