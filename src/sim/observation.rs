//! Policy-facing observation vector
//!
//! Layout: `[ray_0 .. ray_{n-1}, speed, sin(heading), cos(heading)]`, every
//! component in [-1, 1] (rays in [0, 1] when not remapped).

use serde::{Deserialize, Serialize};

use super::car::{CarParams, CarState};
use super::sensor::RayScan;
use crate::error::InputError;

/// Number of non-ray components at the tail of the vector
pub const EXTRA_COMPONENTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawObservation")]
pub struct Observation {
    values: Vec<f32>,
    n_rays: usize,
}

/// Unchecked wire form; the tail accessors index past `n_rays`
#[derive(Deserialize)]
struct RawObservation {
    values: Vec<f32>,
    n_rays: usize,
}

impl TryFrom<RawObservation> for Observation {
    type Error = InputError;

    fn try_from(raw: RawObservation) -> Result<Self, Self::Error> {
        let expected = Observation::dim(raw.n_rays);
        if raw.values.len() != expected {
            return Err(InputError::ObservationShape {
                n_rays: raw.n_rays,
                expected,
                got: raw.values.len(),
            });
        }
        Ok(Self {
            values: raw.values,
            n_rays: raw.n_rays,
        })
    }
}

impl Observation {
    /// Build from a scan and the car state.
    ///
    /// Rays are `d / max_dist`, then `* 2 - 1` if `remap_rays`. Speed is
    /// `speed / max_speed` clamped to [-1, 1].
    pub fn new(scan: &RayScan, state: &CarState, params: &CarParams, remap_rays: bool) -> Self {
        let n_rays = scan.len();
        let mut values = Vec::with_capacity(n_rays + EXTRA_COMPONENTS);
        values.extend(
            scan.normalized()
                .map(|d| if remap_rays { d * 2.0 - 1.0 } else { d }),
        );

        let speed_norm = if params.max_speed > 0.0 {
            (state.speed / params.max_speed).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        values.push(speed_norm);
        values.push(state.heading.sin());
        values.push(state.heading.cos());

        Self { values, n_rays }
    }

    pub fn dim(n_rays: usize) -> usize {
        n_rays + EXTRA_COMPONENTS
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.values
    }

    pub fn rays(&self) -> &[f32] {
        &self.values[..self.n_rays]
    }

    pub fn speed(&self) -> f32 {
        self.values[self.n_rays]
    }

    pub fn heading_sin(&self) -> f32 {
        self.values[self.n_rays + 1]
    }

    pub fn heading_cos(&self) -> f32 {
        self.values[self.n_rays + 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sensor::RaySample;

    fn scan(distances: &[f32]) -> RayScan {
        RayScan {
            samples: distances
                .iter()
                .map(|&distance| RaySample {
                    angle_offset: 0.0,
                    distance,
                })
                .collect(),
            max_dist: 100.0,
        }
    }

    #[test]
    fn test_layout_and_remap() {
        let state = CarState {
            x: 0.0,
            y: 0.0,
            heading: 0.0,
            speed: 210.0,
        };
        let obs = Observation::new(&scan(&[0.0, 50.0, 100.0]), &state, &CarParams::default(), true);
        assert_eq!(obs.as_slice().len(), Observation::dim(3));
        assert_eq!(obs.rays(), &[-1.0, 0.0, 1.0]);
        assert_eq!(obs.speed(), 0.5);
        assert_eq!(obs.heading_sin(), 0.0);
        assert_eq!(obs.heading_cos(), 1.0);

        let raw = Observation::new(&scan(&[0.0, 50.0, 100.0]), &state, &CarParams::default(), false);
        assert_eq!(raw.rays(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_speed_is_clamped() {
        let params = CarParams {
            max_speed: 100.0,
            ..Default::default()
        };
        let fast = CarState {
            speed: 1000.0,
            ..Default::default()
        };
        let obs = Observation::new(&scan(&[]), &fast, &params, true);
        assert_eq!(obs.speed(), 1.0);
        assert!(obs.rays().is_empty());

        let back = CarState {
            speed: -1000.0,
            ..Default::default()
        };
        assert_eq!(Observation::new(&scan(&[]), &back, &params, true).speed(), -1.0);
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let state = CarState {
            heading: 1.0,
            speed: 42.0,
            ..Default::default()
        };
        let obs = Observation::new(&scan(&[10.0, 90.0]), &state, &CarParams::default(), false);
        let json = serde_json::to_string(&obs).unwrap();
        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, obs);

        // Missing tail components would make speed() index out of bounds
        let err = serde_json::from_str::<Observation>(r#"{"values":[0.5,0.5],"n_rays":2}"#).unwrap_err();
        assert!(err.to_string().contains("needs 5 values, got 2"));
        assert!(serde_json::from_str::<Observation>(r#"{"values":[0.0,0.0,1.0],"n_rays":9}"#).is_err());
        assert!(serde_json::from_str::<Observation>(r#"{"values":[0.0,0.0,1.0],"n_rays":0}"#).is_ok());
    }
}
