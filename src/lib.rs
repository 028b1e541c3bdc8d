//! Pixel Racer - A pseudo-3D endless driving arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (road curvature, traffic, player)
//! - `renderer`: WebGPU rendering pipeline
//! - `hud`: Dashboard readout
//! - `audio`: Background music fade-in
//! - `tuning`: Data-driven game balance
//! - `settings`: Per-session options

pub mod audio;
pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Refresh rate every per-frame tuning value is expressed against
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Fixed simulation timestep (one reference frame)
    pub const SIM_DT: f32 = 1.0 / REFERENCE_FPS;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical canvas dimensions
    pub const CANVAS_WIDTH: f32 = 640.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;
    pub const HORIZON_Y: f32 = CANVAS_HEIGHT / 2.0;
    /// Screen rows between the horizon and the bottom edge
    pub const ROAD_HALF_HEIGHT: f32 = CANVAS_HEIGHT / 2.0;

    /// Road width at the horizon and at the bottom of the screen
    pub const ROAD_TOP_WIDTH: f32 = 40.0;
    pub const ROAD_BOTTOM_WIDTH: f32 = 400.0;
    /// Depth at which an entity is drawn at unit scale
    pub const REFERENCE_DEPTH: f32 = 300.0;

    /// Number of AI cars in the traffic pool
    pub const TRAFFIC_POOL_SIZE: usize = 5;
    /// Car footprint at unit scale
    pub const CAR_WIDTH: f32 = 30.0;
    pub const CAR_HEIGHT: f32 = 15.0;

    /// Player car sits at a fixed depth in front of the viewer
    pub const PLAYER_Z: f32 = 100.0;
    /// Player sprite placement (screen space)
    pub const PLAYER_SPRITE_Y: f32 = CANVAS_HEIGHT - 60.0;
    pub const PLAYER_SPRITE_WIDTH: f32 = 30.0;
    pub const PLAYER_SPRITE_HEIGHT: f32 = 20.0;

    /// Dashboard strip along the bottom edge
    pub const DASHBOARD_HEIGHT: f32 = 40.0;
}

/// Number of reference frames covered by `dt` seconds
#[inline]
pub fn reference_frames(dt: f32) -> f32 {
    dt * consts::REFERENCE_FPS
}

/// Move `current` a fraction of the way toward `target`.
///
/// `rate` is the fraction covered in one reference frame; longer steps
/// compound it so the filter behaves the same at any refresh rate.
#[inline]
pub fn smooth_toward(current: f32, target: f32, rate: f32, frames: f32) -> f32 {
    let blend = 1.0 - (1.0 - rate).powf(frames);
    current + (target - current) * blend
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
