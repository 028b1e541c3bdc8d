//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is passed in, never read from a clock
//! - Seeded RNG only, owned by the state
//! - Stable iteration order (traffic pool order)
//! - No rendering or platform dependencies

pub mod curvature;
pub mod input;
pub mod player;
pub mod projection;
pub mod state;
pub mod tick;
pub mod traffic;

pub use curvature::RoadCurvature;
pub use input::{Control, InputState};
pub use player::apply_input;
pub use projection::{Footprint, Projection, player_footprint};
pub use state::SimulationState;
pub use tick::{TickReport, tick};
pub use traffic::{AiCar, CarProjection, Collision, TrafficStep, update_traffic};
