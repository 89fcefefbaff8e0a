//! Built-in drivers
//!
//! A policy maps an observation to a control input. Learned policies live
//! outside this crate and only need to implement [`Policy`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::car::ControlInput;
use crate::sim::observation::Observation;

pub trait Policy {
    fn act(&mut self, obs: &Observation) -> ControlInput;

    /// Called when an episode starts over
    fn reset(&mut self) {}
}

/// Uniform random controls from a seeded stream
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: Pcg32,
    max_brake: f32,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            max_brake: 0.3,
        }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _obs: &Observation) -> ControlInput {
        ControlInput {
            throttle: self.rng.random_range(0.0..1.0),
            brake: self.rng.random_range(0.0..self.max_brake),
            steer: self.rng.random_range(-1.0..1.0),
        }
    }
}

/// Steers toward the longest ray, holding a cruising speed
#[derive(Debug, Clone)]
pub struct GreedyRayPolicy {
    /// Rays in the observation are remapped to [-1, 1]
    pub remapped: bool,
    /// Normalized speed to cruise at (0..1)
    pub cruise_speed: f32,
    /// Brake when the forward ray (normalized 0..1) is shorter than this
    pub brake_below: f32,
}

impl Default for GreedyRayPolicy {
    fn default() -> Self {
        Self {
            remapped: true,
            cruise_speed: 0.6,
            brake_below: 0.25,
        }
    }
}

impl GreedyRayPolicy {
    fn unit(&self, v: f32) -> f32 {
        if self.remapped { (v + 1.0) * 0.5 } else { v }
    }
}

impl Policy for GreedyRayPolicy {
    fn act(&mut self, obs: &Observation) -> ControlInput {
        let rays = obs.rays();
        if rays.is_empty() {
            return ControlInput::new(self.cruise_speed, 0.0, 0.0);
        }

        // First maximum wins, so ties favour the left of the fan
        let (best, _) = rays
            .iter()
            .enumerate()
            .fold((0, f32::MIN), |acc, (i, &v)| if v > acc.1 { (i, v) } else { acc });

        let mid = (rays.len() - 1) as f32 * 0.5;
        let steer = if mid > 0.0 {
            (best as f32 - mid) / mid
        } else {
            0.0
        };

        let forward = self.unit(rays[rays.len() / 2]);
        let speed = obs.speed();
        let (throttle, brake) = if forward < self.brake_below && speed > 0.2 {
            (0.0, 1.0)
        } else if speed < self.cruise_speed {
            (1.0, 0.0)
        } else {
            (0.0, 0.0)
        };

        ControlInput::new(throttle, brake, steer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::car::{CarParams, CarState};
    use crate::sim::sensor::{RayScan, RaySample};

    fn obs(distances: &[f32], speed: f32) -> Observation {
        let scan = RayScan {
            samples: distances
                .iter()
                .map(|&distance| RaySample {
                    angle_offset: 0.0,
                    distance,
                })
                .collect(),
            max_dist: 100.0,
        };
        let state = CarState {
            speed,
            ..Default::default()
        };
        Observation::new(&scan, &state, &CarParams::default(), true)
    }

    #[test]
    fn test_random_policy_is_seeded_and_in_range() {
        let o = obs(&[50.0; 5], 0.0);
        let mut a = RandomPolicy::new(7);
        let mut b = RandomPolicy::new(7);
        for _ in 0..200 {
            let x = a.act(&o);
            assert_eq!(x, b.act(&o));
            assert!((0.0..1.0).contains(&x.throttle));
            assert!((0.0..0.3).contains(&x.brake));
            assert!((-1.0..1.0).contains(&x.steer));
        }
    }

    #[test]
    fn test_greedy_steers_toward_open_space() {
        let mut policy = GreedyRayPolicy::default();
        let right = policy.act(&obs(&[10.0, 20.0, 30.0, 40.0, 90.0], 0.0));
        assert_eq!(right.steer, 1.0);
        assert_eq!(right.throttle, 1.0);

        let left = policy.act(&obs(&[90.0, 20.0, 30.0, 40.0, 10.0], 0.0));
        assert_eq!(left.steer, -1.0);

        let ahead = policy.act(&obs(&[10.0, 20.0, 90.0, 20.0, 10.0], 0.0));
        assert_eq!(ahead.steer, 0.0);
    }

    #[test]
    fn test_greedy_brakes_near_wall() {
        let mut policy = GreedyRayPolicy::default();
        let max_speed = CarParams::default().max_speed;
        let out = policy.act(&obs(&[50.0, 50.0, 10.0, 60.0, 50.0], 0.5 * max_speed));
        assert_eq!(out.brake, 1.0);
        assert_eq!(out.throttle, 0.0);

        // Cruising with room ahead: coast
        let out = policy.act(&obs(&[50.0, 50.0, 80.0, 60.0, 50.0], 0.9 * max_speed));
        assert_eq!((out.throttle, out.brake), (0.0, 0.0));
    }
}
