//! Simulation state
//!
//! Everything the tick mutates lives in one struct owned by the caller,
//! including the random source, so a seed fully determines a run.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::curvature::RoadCurvature;
use super::traffic::AiCar;
use crate::consts::TRAFFIC_POOL_SIZE;
use crate::tuning::Tuning;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Run seed (0 when built from an external RNG)
    pub seed: u64,
    /// Forward speed, always within [0, max_speed]
    pub speed: f32,
    /// Lateral position in road half-widths
    pub player_x: f32,
    /// Road bend
    pub road: RoadCurvature,
    /// Distance scrolled, drives lane marker phase
    pub road_offset: f32,
    /// Traffic pool; slots keep their identity for the whole run
    pub cars: [AiCar; TRAFFIC_POOL_SIZE],
    /// Simulation step counter
    pub frame: u64,
    /// Gameplay constants
    pub tuning: Tuning,
    pub(super) rng: Pcg32,
}

impl SimulationState {
    /// Create a new simulation with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a simulation drawing from an existing random source
    pub fn with_rng(mut rng: Pcg32, tuning: Tuning) -> Self {
        let road = RoadCurvature::new(&mut rng, &tuning);
        let cars = std::array::from_fn(|_| AiCar::spawn_initial(&mut rng, &tuning));

        Self {
            seed: 0,
            speed: 0.0,
            player_x: 0.0,
            road,
            road_offset: 0.0,
            cars,
            frame: 0,
            tuning,
            rng,
        }
    }

    /// Create a seeded simulation with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::with_rng(Pcg32::seed_from_u64(seed), tuning);
        state.seed = seed;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_at_rest() {
        let state = SimulationState::new(12345);
        assert_eq!(state.seed, 12345);
        assert_eq!(state.speed, 0.0);
        assert_eq!(state.player_x, 0.0);
        assert_eq!(state.road.curve, 0.0);
        assert_eq!(state.road.future_curve, 0.0);
        assert_eq!(state.frame, 0);
        assert_eq!(state.cars.len(), TRAFFIC_POOL_SIZE);
    }

    #[test]
    fn test_same_seed_same_traffic() {
        let a = SimulationState::new(99);
        let b = SimulationState::new(99);
        assert_eq!(a.cars, b.cars);
        assert_eq!(a.road, b.road);

        let c = SimulationState::new(100);
        assert_ne!(a.cars, c.cars);
    }
}
