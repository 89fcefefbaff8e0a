//! Car state, control inputs and the dynamics integrator
//!
//! `step` is a pure function of (state, params, input, dt). `Car` wraps it
//! with the spawn pose so a caller can reset without rebuilding parameters.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::SpawnConfig;
use crate::error::ConfigError;

/// Kinematic state of the car
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CarState {
    pub x: f32,
    pub y: f32,
    /// Radians from +x, unbounded (never wrapped)
    pub heading: f32,
    /// Signed speed along the heading (pixels/second)
    pub speed: f32,
}

impl CarState {
    pub fn at_spawn(spawn: &SpawnConfig) -> Self {
        Self {
            x: spawn.x,
            y: spawn.y,
            heading: spawn.heading_rad,
            speed: 0.0,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Unit vector along the heading
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.heading.cos(), self.heading.sin())
    }
}

/// Handling parameters (pixels, seconds, radians)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarParams {
    pub max_speed: f32,
    pub accel: f32,
    pub brake: f32,
    pub friction: f32,
    /// Yaw rate at full steer and full steering authority (rad/s)
    pub steer_rate: f32,
    /// Steering authority per unit of |speed|, saturating at 1
    pub steer_speed_factor: f32,
    /// Reverse top speed as a fraction of `max_speed`
    pub reverse_speed_factor: f32,

    // Body dimensions, used for the render footprint only
    pub width: f32,
    pub height: f32,
    pub nose_length: f32,
}

impl Default for CarParams {
    fn default() -> Self {
        Self {
            max_speed: 420.0,
            accel: 600.0,
            brake: 900.0,
            friction: 420.0,
            steer_rate: 2.6,
            steer_speed_factor: 0.004,
            reverse_speed_factor: 0.35,
            width: 44.0,
            height: 22.0,
            nose_length: 28.0,
        }
    }
}

impl CarParams {
    /// Lowest reachable speed (reversing)
    #[inline]
    pub fn min_speed(&self) -> f32 {
        -self.max_speed * self.reverse_speed_factor
    }

    /// All physics parameters must be finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("max_speed", self.max_speed),
            ("accel", self.accel),
            ("brake", self.brake),
            ("friction", self.friction),
            ("steer_rate", self.steer_rate),
            ("steer_speed_factor", self.steer_speed_factor),
            ("reverse_speed_factor", self.reverse_speed_factor),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidCarParam { field, value });
            }
        }
        Ok(())
    }
}

/// Normalized control for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlInput {
    /// 0..1
    pub throttle: f32,
    /// 0..1
    pub brake: f32,
    /// -1 (left) .. +1 (right)
    pub steer: f32,
}

impl ControlInput {
    pub const fn new(throttle: f32, brake: f32, steer: f32) -> Self {
        Self {
            throttle,
            brake,
            steer,
        }
    }

    /// Clamp every component into its range; NaN becomes 0
    pub fn clamped(self) -> Self {
        Self {
            throttle: clamp_or_zero(self.throttle, 0.0, 1.0),
            brake: clamp_or_zero(self.brake, 0.0, 1.0),
            steer: clamp_or_zero(self.steer, -1.0, 1.0),
        }
    }
}

#[inline]
fn clamp_or_zero(v: f32, lo: f32, hi: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(lo, hi) }
}

/// Raw digital driving keys (W/S/A/D)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyState {
    pub forward: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    pub fn to_input(self) -> ControlInput {
        let axis = |on: bool| if on { 1.0 } else { 0.0 };
        ControlInput {
            throttle: axis(self.forward),
            brake: axis(self.reverse),
            steer: axis(self.right) - axis(self.left),
        }
    }
}

/// Either shape of control a driver can hand the car
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputSource {
    Keys(KeyState),
    Normalized(ControlInput),
}

impl InputSource {
    /// Resolve to a clamped normalized input
    pub fn resolve(&self) -> ControlInput {
        match *self {
            InputSource::Keys(keys) => keys.to_input(),
            InputSource::Normalized(input) => input.clamped(),
        }
    }
}

impl From<KeyState> for InputSource {
    fn from(keys: KeyState) -> Self {
        InputSource::Keys(keys)
    }
}

impl From<ControlInput> for InputSource {
    fn from(input: ControlInput) -> Self {
        InputSource::Normalized(input)
    }
}

/// Advance `state` by `dt` seconds.
///
/// Order matters: throttle and brake, then friction toward zero, then the
/// speed clamp, then steering (scaled by the clamped speed), then position.
pub fn step(state: CarState, params: &CarParams, input: ControlInput, dt: f32) -> CarState {
    let input = input.clamped();
    let mut next = state;

    // Longitudinal
    if input.throttle > 0.0 {
        next.speed += params.accel * input.throttle * dt;
    }
    if input.brake > 0.0 {
        next.speed -= params.brake * input.brake * dt;
    }

    // Friction toward zero, never past it
    let drag = params.friction * dt;
    if next.speed > 0.0 {
        next.speed = (next.speed - drag).max(0.0);
    } else if next.speed < 0.0 {
        next.speed = (next.speed + drag).min(0.0);
    }

    next.speed = next.speed.clamp(params.min_speed(), params.max_speed);

    // No turning in place
    let steer_scale = (next.speed.abs() * params.steer_speed_factor).clamp(0.0, 1.0);
    // Yaw flips when reversing
    let direction = if next.speed >= 0.0 { 1.0 } else { -1.0 };
    next.heading += input.steer * direction * params.steer_rate * steer_scale * dt;

    let vel = Vec2::new(next.heading.cos(), next.heading.sin()) * next.speed;
    next.x += vel.x * dt;
    next.y += vel.y * dt;

    next
}

/// A car bound to its parameters and spawn pose
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    params: CarParams,
    spawn: SpawnConfig,
    pub state: CarState,
}

impl Car {
    pub fn new(params: CarParams, spawn: SpawnConfig) -> Self {
        Self {
            params,
            spawn,
            state: CarState::at_spawn(&spawn),
        }
    }

    /// Back to the spawn pose at rest
    pub fn reset(&mut self) {
        self.state = CarState::at_spawn(&self.spawn);
    }

    pub fn step(&mut self, input: &InputSource, dt: f32) {
        self.state = step(self.state, &self.params, input.resolve(), dt);
    }

    pub fn params(&self) -> &CarParams {
        &self.params
    }

    pub fn spawn(&self) -> &SpawnConfig {
        &self.spawn
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.state.position()
    }

    /// Body rectangle corners in world space, rotated by the heading
    pub fn footprint(&self) -> [Vec2; 4] {
        let half = Vec2::new(self.params.width, self.params.height) * 0.5;
        let rot = Vec2::from_angle(self.state.heading);
        let center = self.position();
        [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ]
        .map(|corner| center + rot.rotate(corner))
    }

    /// Heading indicator segment from the car centre to its nose
    pub fn nose(&self) -> (Vec2, Vec2) {
        let center = self.position();
        (center, center + self.state.forward() * self.params.nose_length)
    }
}
