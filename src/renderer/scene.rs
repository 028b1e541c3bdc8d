//! Frame builder
//!
//! Turns the simulation state into one triangle list, back to front. The
//! simulation is only read; the cosmetic scenery (stars, clouds, lit windows)
//! is owned here and has its own RNG so drawing never shifts the simulation's
//! random stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::shapes::{circle, gradient_rect, rect};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::QualityPreset;
use crate::sim::{Projection, SimulationState, player_footprint};

/// Buildings along the horizon
const BUILDING_COUNT: usize = 50;
const BUILDING_SPACING: f32 = 13.0;
const BUILDING_WIDTH: f32 = 10.0;
/// Lit window size and grid pitch
const WINDOW_SIZE: f32 = 2.0;
const WINDOW_PITCH: f32 = 5.0;
const WINDOW_LIT_CHANCE: f64 = 0.3;

/// Lane markers repeat every this many scanlines
const MARKER_SPACING: f32 = 20.0;
const MARKER_WIDTH: f32 = 10.0;
const MARKER_HEIGHT: f32 = 2.0;

/// Cloud drift in canvas units per second
const CLOUD_DRIFT_SPEED: f32 = 6.0;

#[derive(Debug, Clone)]
struct Star {
    pos: Vec2,
    size: f32,
}

#[derive(Debug, Clone)]
struct Cloud {
    /// Position before drift
    origin: Vec2,
    radius: f32,
    /// Relative speed (parallax)
    depth: f32,
}

/// Cosmetic background picked once per session
#[derive(Debug, Clone)]
pub struct Scenery {
    stars: Vec<Star>,
    clouds: Vec<Cloud>,
    /// Top-left corners of lit windows
    windows: Vec<Vec2>,
    /// Cloud offset, advanced by the renderer only
    cloud_drift: f32,
}

impl Scenery {
    pub fn new(seed: u64, quality: QualityPreset) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let stars = (0..quality.star_count())
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..CANVAS_WIDTH),
                    rng.random_range(0.0..HORIZON_Y * 0.7),
                ),
                size: if rng.random_bool(0.2) { 2.0 } else { 1.0 },
            })
            .collect();

        let clouds = (0..quality.cloud_count())
            .map(|_| Cloud {
                origin: Vec2::new(
                    rng.random_range(0.0..CANVAS_WIDTH),
                    rng.random_range(20.0..HORIZON_Y * 0.6),
                ),
                radius: rng.random_range(8.0..16.0),
                depth: rng.random_range(0.5..1.5),
            })
            .collect();

        let mut windows = Vec::new();
        for i in 0..BUILDING_COUNT {
            let left = i as f32 * BUILDING_SPACING;
            let height = building_height(i);
            let top = HORIZON_Y - height;
            let rows = ((height - WINDOW_PITCH) / WINDOW_PITCH) as usize;
            for row in 0..rows {
                for col in 0..2 {
                    if rng.random_bool(WINDOW_LIT_CHANCE) {
                        windows.push(Vec2::new(
                            left + 2.0 + col as f32 * WINDOW_PITCH,
                            top + 3.0 + row as f32 * WINDOW_PITCH,
                        ));
                    }
                }
            }
        }

        Self {
            stars,
            clouds,
            windows,
            cloud_drift: 0.0,
        }
    }

    /// Advance cosmetic animation by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.cloud_drift += CLOUD_DRIFT_SPEED * dt;
    }

    /// Build the full frame for the current state
    pub fn build_frame(&self, state: &SimulationState) -> Vec<Vertex> {
        let mut out = Vec::with_capacity(8 * 1024);

        self.push_sky(&mut out);
        self.push_cityscape(&mut out);
        push_road(&mut out, state);
        push_traffic(&mut out, state);
        push_player(&mut out, state.player_x);
        push_dashboard(&mut out);

        out
    }

    fn push_sky(&self, out: &mut Vec<Vertex>) {
        gradient_rect(
            out,
            Vec2::ZERO,
            Vec2::new(CANVAS_WIDTH, HORIZON_Y),
            colors::SKY_TOP,
            colors::SKY_HORIZON,
        );

        for star in &self.stars {
            rect(out, star.pos, Vec2::splat(star.size), colors::STAR);
        }

        for cloud in &self.clouds {
            // Wrap with room for the cloud to leave one edge fully
            let span = CANVAS_WIDTH + cloud.radius * 6.0;
            let x = (cloud.origin.x + self.cloud_drift * cloud.depth).rem_euclid(span)
                - cloud.radius * 3.0;
            for (dx, scale) in [(-1.2, 0.8), (0.0, 1.0), (1.2, 0.7)] {
                circle(
                    out,
                    Vec2::new(x + dx * cloud.radius, cloud.origin.y),
                    cloud.radius * scale,
                    colors::CLOUD,
                    12,
                );
            }
        }
    }

    fn push_cityscape(&self, out: &mut Vec<Vertex>) {
        for i in 0..BUILDING_COUNT {
            let height = building_height(i);
            rect(
                out,
                Vec2::new(i as f32 * BUILDING_SPACING, HORIZON_Y - height),
                Vec2::new(BUILDING_WIDTH, height),
                colors::BUILDING,
            );
        }
        for window in &self.windows {
            rect(out, *window, Vec2::splat(WINDOW_SIZE), colors::WINDOW_LIT);
        }
    }
}

fn building_height(i: usize) -> f32 {
    20.0 + (i % 5) as f32 * 10.0
}

/// One scanline per row from the horizon down
fn push_road(out: &mut Vec<Vertex>, state: &SimulationState) {
    let rows = ROAD_HALF_HEIGHT as u32;
    for i in 0..rows {
        let depth = i as f32 / ROAD_HALF_HEIGHT;
        let row = Projection::at_scale(depth, state.road.future_curve);

        rect(
            out,
            Vec2::new(0.0, row.y),
            Vec2::new(CANVAS_WIDTH, 1.0),
            colors::GRASS,
        );
        rect(
            out,
            Vec2::new(row.road_left(), row.y),
            Vec2::new(row.road_width, 1.0),
            colors::ROAD,
        );

        let phase = (state.road_offset * depth * 0.5).rem_euclid(MARKER_SPACING);
        if (i as f32 + phase).rem_euclid(MARKER_SPACING) < MARKER_HEIGHT {
            rect(
                out,
                Vec2::new(row.center_x - MARKER_WIDTH / 2.0, row.y),
                Vec2::new(MARKER_WIDTH, MARKER_HEIGHT),
                colors::LANE_MARKER,
            );
        }
    }
}

fn push_traffic(out: &mut Vec<Vertex>, state: &SimulationState) {
    for car in &state.cars {
        let placed = car.project(state.road.future_curve);
        if !placed.visible {
            continue;
        }
        rect(
            out,
            Vec2::new(placed.center_x - placed.width / 2.0, placed.y - placed.height),
            Vec2::new(placed.width, placed.height),
            colors::AI_CAR,
        );
    }
}

fn push_player(out: &mut Vec<Vertex>, player_x: f32) {
    let center_x = player_footprint(player_x).center_x;
    rect(
        out,
        Vec2::new(center_x - PLAYER_SPRITE_WIDTH / 2.0, PLAYER_SPRITE_Y),
        Vec2::new(PLAYER_SPRITE_WIDTH, PLAYER_SPRITE_HEIGHT),
        colors::PLAYER_BODY,
    );
    rect(
        out,
        Vec2::new(center_x - 10.0, PLAYER_SPRITE_Y + 5.0),
        Vec2::new(20.0, 10.0),
        colors::PLAYER_WINDOW,
    );
}

fn push_dashboard(out: &mut Vec<Vertex>) {
    rect(
        out,
        Vec2::new(0.0, CANVAS_HEIGHT - DASHBOARD_HEIGHT),
        Vec2::new(CANVAS_WIDTH, DASHBOARD_HEIGHT),
        colors::DASHBOARD,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::AiCar;

    fn count_color(frame: &[Vertex], color: [f32; 4]) -> usize {
        frame.iter().filter(|v| v.color == color).count()
    }

    fn x_range(frame: &[Vertex], color: [f32; 4]) -> (f32, f32) {
        frame
            .iter()
            .filter(|v| v.color == color)
            .fold((f32::MAX, f32::MIN), |(lo, hi), v| {
                (lo.min(v.position[0]), hi.max(v.position[0]))
            })
    }

    #[test]
    fn test_frame_is_triangle_list() {
        let state = SimulationState::new(1);
        let frame = Scenery::new(1, QualityPreset::High).build_frame(&state);
        assert!(!frame.is_empty());
        assert_eq!(frame.len() % 3, 0);
    }

    #[test]
    fn test_offscreen_cars_are_skipped() {
        let mut state = SimulationState::new(1);
        let scenery = Scenery::new(1, QualityPreset::Low);

        for car in state.cars.iter_mut() {
            *car = AiCar { z: 100.0, x: 0.0, speed: 3.0 };
        }
        assert_eq!(count_color(&scenery.build_frame(&state), colors::AI_CAR), 0);

        for car in state.cars.iter_mut() {
            car.z = 600.0;
        }
        assert_eq!(
            count_color(&scenery.build_frame(&state), colors::AI_CAR),
            6 * TRAFFIC_POOL_SIZE
        );
    }

    #[test]
    fn test_player_sprite_follows_lateral_position() {
        let mut state = SimulationState::new(1);
        let scenery = Scenery::new(1, QualityPreset::Low);

        let (lo, hi) = x_range(&scenery.build_frame(&state), colors::PLAYER_BODY);
        assert_eq!((lo, hi), (305.0, 335.0));

        state.player_x = 1.0;
        let (lo, hi) = x_range(&scenery.build_frame(&state), colors::PLAYER_BODY);
        assert_eq!((lo, hi), (405.0, 435.0));
    }

    #[test]
    fn test_road_narrows_toward_horizon() {
        let state = SimulationState::new(1);
        let frame = Scenery::new(1, QualityPreset::Low).build_frame(&state);
        let road: Vec<&Vertex> = frame.iter().filter(|v| v.color == colors::ROAD).collect();

        let width_at = |y: f32| {
            let row: Vec<f32> = road
                .iter()
                .filter(|v| v.position[1] == y)
                .map(|v| v.position[0])
                .collect();
            row.iter().cloned().fold(f32::MIN, f32::max) - row.iter().cloned().fold(f32::MAX, f32::min)
        };
        assert!((width_at(HORIZON_Y) - ROAD_TOP_WIDTH).abs() < 1e-3);
        assert!(width_at(HORIZON_Y + 150.0) > width_at(HORIZON_Y + 50.0));
    }

    #[test]
    fn test_lane_markers_scroll() {
        let mut state = SimulationState::new(1);
        let scenery = Scenery::new(1, QualityPreset::Low);
        let still = scenery.build_frame(&state);
        state.road_offset = 137.0;
        let moved = scenery.build_frame(&state);

        let markers = |frame: &[Vertex]| -> Vec<[f32; 2]> {
            frame
                .iter()
                .filter(|v| v.color == colors::LANE_MARKER)
                .map(|v| v.position)
                .collect()
        };
        assert!(!markers(&still).is_empty());
        assert_ne!(markers(&still), markers(&moved));
    }

    #[test]
    fn test_scenery_is_seeded() {
        let a = Scenery::new(42, QualityPreset::High);
        let b = Scenery::new(42, QualityPreset::High);
        let state = SimulationState::new(3);
        assert_eq!(a.build_frame(&state), b.build_frame(&state));
        let lit = a
            .build_frame(&state)
            .iter()
            .filter(|v| v.color == colors::WINDOW_LIT)
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn test_low_quality_draws_no_stars() {
        let state = SimulationState::new(3);
        let frame = Scenery::new(9, QualityPreset::Low).build_frame(&state);
        assert_eq!(count_color(&frame, colors::STAR), 0);
        assert_eq!(count_color(&frame, colors::CLOUD), 0);
    }

    #[test]
    fn test_clouds_drift_but_state_does_not() {
        let state = SimulationState::new(3);
        let mut scenery = Scenery::new(9, QualityPreset::High);
        let before = scenery.build_frame(&state);
        scenery.advance(1.0);
        let after = scenery.build_frame(&state);
        assert_ne!(before, after);
        assert_eq!(state.frame, 0);
    }
}
