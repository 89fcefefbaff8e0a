//! Step/reset adapter for learning agents
//!
//! Fixed `dt` per step. An episode terminates when the car leaves the track
//! and is truncated after `max_steps` steps.

use super::car::{ControlInput, InputSource};
use super::observation::Observation;
use super::world::{EpisodeStats, World};
use crate::config::{EnvConfig, GameConfig};
use crate::error::{ConfigError, InputError};

/// Components per action: `[steer, throttle, brake]`
pub const ACTION_DIM: usize = 3;

/// Result of one `step`
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f32,
    /// Episode ended by leaving the track
    pub terminated: bool,
    /// Episode ended by the step limit
    pub truncated: bool,
    pub off_track: bool,
}

impl StepOutcome {
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

#[derive(Debug, Clone)]
pub struct DrivingEnv {
    world: World,
    config: EnvConfig,
    step_count: u32,
}

impl DrivingEnv {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.env.validate()?;
        let world = World::new(config)?;
        log::debug!(
            "Environment ready: {} rays, obs dim {}, dt {:.4}",
            world.sensor().n_rays(),
            Observation::dim(world.sensor().n_rays()),
            config.env.dt
        );
        Ok(Self {
            world,
            config: config.env,
            step_count: 0,
        })
    }

    pub fn observation_dim(&self) -> usize {
        Observation::dim(self.world.sensor().n_rays())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.world.stats
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn reset(&mut self) -> Observation {
        self.world.reset();
        self.step_count = 0;
        self.observe()
    }

    /// Step with a raw action vector `[steer, throttle, brake]`.
    ///
    /// Wrong length is an error; out-of-range values are clamped.
    pub fn step(&mut self, action: &[f32]) -> Result<StepOutcome, InputError> {
        let &[steer, throttle, brake] = action else {
            return Err(InputError::ActionShape {
                expected: ACTION_DIM,
                got: action.len(),
            });
        };
        Ok(self.step_input(ControlInput::new(throttle, brake, steer)))
    }

    pub fn step_input(&mut self, input: ControlInput) -> StepOutcome {
        self.step_count += 1;
        let dt = self.config.dt;

        let tick = self.world.tick(&InputSource::Normalized(input), dt);

        let mut reward = self.world.car.state.speed.max(0.0) * dt * self.config.progress_weight;
        if tick.off_track {
            reward -= self.config.off_track_penalty;
        }

        let outcome = StepOutcome {
            observation: self.observe(),
            reward,
            terminated: tick.off_track,
            truncated: self.step_count >= self.config.max_steps,
            off_track: tick.off_track,
        };
        if outcome.done() {
            log::debug!(
                "Episode ended after {} steps: off_track={}, elapsed={:.2}s, distance={:.1}px",
                self.step_count,
                outcome.off_track,
                self.world.stats.elapsed,
                self.world.stats.travelled_distance
            );
        }
        outcome
    }

    fn observe(&self) -> Observation {
        self.world.observation(self.config.remap_rays)
    }
}
