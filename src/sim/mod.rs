//! Deterministic simulation module
//!
//! Pure, allocation-light computation over value types:
//! - Fixed timestep supplied by the caller
//! - No I/O, no rendering, no hidden state between calls
//! - Each world owns its car exclusively; tracks are immutable and shareable

pub mod car;
pub mod env;
pub mod observation;
pub mod rect;
pub mod sensor;
pub mod track;
pub mod world;

pub use car::{Car, CarParams, CarState, ControlInput, InputSource, KeyState, step};
pub use env::{ACTION_DIM, DrivingEnv, StepOutcome};
pub use observation::Observation;
pub use rect::{Corner, Rect, RoundedRect};
pub use sensor::{RayFan, RayScan, RaySample};
pub use track::Track;
pub use world::{EpisodeStats, TickOutcome, World};
