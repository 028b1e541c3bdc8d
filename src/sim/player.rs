//! Player vehicle controller

use super::input::InputState;
use crate::tuning::Tuning;

/// Apply held controls to the player's speed and lateral position.
///
/// Every held control applies in the same step. Steering clamps to the road
/// edges; a position already pushed past an edge by a bounce is pulled back
/// in only when the player steers.
pub fn apply_input(
    speed: &mut f32,
    player_x: &mut f32,
    input: &InputState,
    tuning: &Tuning,
    frames: f32,
) {
    if input.accelerate {
        *speed = (*speed + tuning.acceleration * frames).min(tuning.max_speed);
    }
    if input.brake {
        *speed = (*speed - tuning.braking * frames).max(0.0);
    }
    if input.steer_left {
        *player_x = (*player_x - tuning.steer_rate * frames).max(-1.0);
    }
    if input.steer_right {
        *player_x = (*player_x + tuning.steer_rate * frames).min(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn step(speed: &mut f32, x: &mut f32, input: InputState) {
        apply_input(speed, x, &input, &Tuning::default(), 1.0);
    }

    #[test]
    fn test_accelerate_and_clamp() {
        let (mut speed, mut x) = (7.95, 0.0);
        let input = InputState {
            accelerate: true,
            ..Default::default()
        };
        step(&mut speed, &mut x, input);
        assert_eq!(speed, 8.0);
    }

    #[test]
    fn test_brake_never_reverses() {
        let (mut speed, mut x) = (0.05, 0.0);
        let input = InputState {
            brake: true,
            ..Default::default()
        };
        step(&mut speed, &mut x, input);
        assert_eq!(speed, 0.0);
    }

    #[test]
    fn test_steer_clamps_to_edges() {
        let (mut speed, mut x) = (0.0, -0.98);
        let input = InputState {
            steer_left: true,
            ..Default::default()
        };
        step(&mut speed, &mut x, input);
        assert_eq!(x, -1.0);
    }

    #[test]
    fn test_controls_combine() {
        let (mut speed, mut x) = (1.0, 0.0);
        let input = InputState {
            accelerate: true,
            steer_left: true,
            ..Default::default()
        };
        step(&mut speed, &mut x, input);
        assert!((speed - 1.1).abs() < 1e-6);
        assert!((x - -0.05).abs() < 1e-6);
    }

    #[test]
    fn test_opposing_controls_cancel() {
        let (mut speed, mut x) = (2.0, 0.3);
        let input = InputState {
            accelerate: true,
            brake: true,
            steer_left: true,
            steer_right: true,
        };
        step(&mut speed, &mut x, input);
        assert!((speed - 2.0).abs() < 1e-6);
        assert!((x - 0.3).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_bounds_hold(
            mut speed in 0.0f32..=8.0,
            mut x in -1.0f32..=1.0,
            controls in proptest::collection::vec(any::<(bool, bool, bool, bool)>(), 1..200),
        ) {
            for (accelerate, brake, steer_left, steer_right) in controls {
                let input = InputState { accelerate, brake, steer_left, steer_right };
                step(&mut speed, &mut x, input);
                prop_assert!((0.0..=8.0).contains(&speed));
                prop_assert!((-1.0..=1.0).contains(&x));
            }
        }
    }
}
