//! Simulation tick
//!
//! Advances the whole simulation by one step: player controls, road bend,
//! road scroll, then traffic.

use super::input::InputState;
use super::player::apply_input;
use super::state::SimulationState;
use super::traffic::{PlayerContact, update_traffic};
use crate::reference_frames;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Player/car bounces resolved
    pub collisions: u32,
    /// Cars respawned far ahead
    pub recycled: u32,
}

/// Advance the simulation by `dt` seconds
pub fn tick(state: &mut SimulationState, input: &InputState, dt: f32) -> TickReport {
    let frames = reference_frames(dt);

    apply_input(
        &mut state.speed,
        &mut state.player_x,
        input,
        &state.tuning,
        frames,
    );

    state.road.update(&mut state.rng, &state.tuning, dt);

    state.road_offset += state.speed * state.tuning.road_scroll * frames;

    let traffic = update_traffic(
        &mut state.cars,
        PlayerContact {
            x: &mut state.player_x,
            speed: &mut state.speed,
        },
        state.road.future_curve,
        &mut state.rng,
        &state.tuning,
        frames,
    );

    state.frame += 1;

    TickReport {
        collisions: traffic.collisions.len() as u32,
        recycled: traffic.recycled,
    }
}
