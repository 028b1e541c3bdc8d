//! Road curvature generator
//!
//! A countdown occasionally kicks the bend target to ±strength; between
//! kicks the target decays back to straight. Two cascaded low-pass filters
//! turn that into the curve velocity, the accumulated curve, and the lagged
//! lookahead curve the projector bends the road with.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::{reference_frames, smooth_toward};

/// Road bend state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadCurvature {
    /// Accumulated bend (grows without bound on long bends)
    pub curve: f32,
    /// Rate `curve` changes per frame
    pub curve_delta: f32,
    /// Lagged copy of `curve` used for rendering lookahead
    pub future_curve: f32,
    /// Seconds until the next bend
    pub curve_timer: f32,
    /// Bend the filters are chasing
    pub curve_target: f32,
}

impl RoadCurvature {
    /// Straight road with a freshly drawn countdown
    pub fn new(rng: &mut impl Rng, tuning: &Tuning) -> Self {
        Self {
            curve: 0.0,
            curve_delta: 0.0,
            future_curve: 0.0,
            curve_timer: next_interval(rng, tuning),
            curve_target: 0.0,
        }
    }

    /// Advance by `dt` seconds
    pub fn update(&mut self, rng: &mut impl Rng, tuning: &Tuning, dt: f32) {
        let frames = reference_frames(dt);

        self.curve_timer -= dt;
        if self.curve_timer <= 0.0 {
            let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            self.curve_target = sign * tuning.curve_strength;
            self.curve_timer = next_interval(rng, tuning);
            log::debug!("New road bend: {:+.1}", self.curve_target);
        } else {
            self.curve_target *= tuning.curve_target_decay.powf(frames);
            if self.curve_target.abs() < tuning.curve_snap_threshold {
                self.curve_target = 0.0;
            }
        }

        self.curve_delta = smooth_toward(
            self.curve_delta,
            self.curve_target,
            tuning.curve_delta_rate,
            frames,
        );
        self.curve += self.curve_delta * frames;
        self.future_curve =
            smooth_toward(self.future_curve, self.curve, tuning.future_curve_rate, frames);
    }
}

/// Random countdown length in seconds
fn next_interval(rng: &mut impl Rng, tuning: &Tuning) -> f32 {
    rng.random_range(tuning.curve_interval_min..tuning.curve_interval_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (RoadCurvature, Pcg32, Tuning) {
        let mut rng = Pcg32::seed_from_u64(7);
        let tuning = Tuning::default();
        let road = RoadCurvature::new(&mut rng, &tuning);
        (road, rng, tuning)
    }

    #[test]
    fn test_initial_interval_in_range() {
        let (road, _, tuning) = setup();
        assert!(road.curve_timer >= tuning.curve_interval_min);
        assert!(road.curve_timer < tuning.curve_interval_max);
    }

    #[test]
    fn test_at_rest_stays_at_rest() {
        let (mut road, mut rng, tuning) = setup();
        for _ in 0..100 {
            road.update(&mut rng, &tuning, SIM_DT);
        }
        assert_eq!(road.curve_target, 0.0);
        assert_eq!(road.curve_delta, 0.0);
        assert_eq!(road.curve, 0.0);
        assert_eq!(road.future_curve, 0.0);
    }

    #[test]
    fn test_timer_expiry_picks_a_bend() {
        let (mut road, mut rng, tuning) = setup();
        road.curve_timer = SIM_DT / 2.0;
        road.update(&mut rng, &tuning, SIM_DT);
        assert_eq!(road.curve_target.abs(), tuning.curve_strength);
        assert!(road.curve_timer >= tuning.curve_interval_min);
        assert!(road.curve_timer < tuning.curve_interval_max);
    }

    #[test]
    fn test_target_decays_then_snaps() {
        let (mut road, mut rng, tuning) = setup();
        road.curve_target = 1.5;
        road.update(&mut rng, &tuning, SIM_DT);
        assert!((road.curve_target - 1.47).abs() < 1e-4);

        // 0.98^n * 1.5 < 0.1 after ~134 frames
        for _ in 0..140 {
            road.update(&mut rng, &tuning, SIM_DT);
        }
        assert_eq!(road.curve_target, 0.0);
    }

    #[test]
    fn test_filters_lag_behind_target() {
        let (mut road, mut rng, tuning) = setup();
        road.curve_target = 1.5;
        road.update(&mut rng, &tuning, SIM_DT);

        // Target decays first, then the delta moves 5% toward it
        assert!((road.curve_delta - 1.47 * 0.05).abs() < 1e-4);
        assert!((road.curve - road.curve_delta).abs() < 1e-6);
        assert!((road.future_curve - road.curve * 0.1).abs() < 1e-6);
        assert!(road.future_curve.abs() < road.curve.abs());
    }

    #[test]
    fn test_frame_rate_independent() {
        // 120 Hz for one second should land close to 60 Hz for one second
        let (mut a, mut rng_a, tuning) = setup();
        let (mut b, mut rng_b, _) = setup();
        a.curve_target = 1.5;
        b.curve_target = 1.5;
        for _ in 0..60 {
            a.update(&mut rng_a, &tuning, SIM_DT);
        }
        for _ in 0..120 {
            b.update(&mut rng_b, &tuning, SIM_DT / 2.0);
        }
        assert!((a.curve_target - b.curve_target).abs() < 1e-3);
        assert!((a.curve - b.curve).abs() / a.curve.abs() < 0.05);
    }
}
