//! AI traffic
//!
//! A fixed pool of cars is advanced relative to the player's speed. Cars that
//! leave the depth window are respawned far ahead, so the road never runs out
//! of traffic. Near the player's depth, overlapping cars bounce apart.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::projection::{Footprint, Projection, player_footprint};
use crate::consts::*;
use crate::tuning::Tuning;

/// One AI car. Cars are never destroyed, only respawned in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiCar {
    /// Distance ahead of the viewer
    pub z: f32,
    /// Lateral position in road half-widths
    pub x: f32,
    /// Cruising speed
    pub speed: f32,
}

impl AiCar {
    /// Car somewhere in the initial traffic window
    pub fn spawn_initial(rng: &mut impl Rng, tuning: &Tuning) -> Self {
        Self {
            z: rng.random_range(tuning.initial_z_min..tuning.initial_z_max),
            x: rng.random_range(-1.0..1.0),
            speed: rng.random_range(tuning.car_speed_min..tuning.car_speed_max),
        }
    }

    /// Respawn far ahead with a fresh lane and speed
    pub fn respawn(&mut self, rng: &mut impl Rng, tuning: &Tuning) {
        self.z = rng.random_range(tuning.spawn_z_min..tuning.spawn_z_max);
        self.x = rng.random_range(-1.0..1.0);
        self.speed = rng.random_range(tuning.car_speed_min..tuning.car_speed_max);
    }

    /// Move by the closing speed; faster cars pull away, slower ones approach
    pub fn advance(&mut self, player_speed: f32, frames: f32) {
        self.z -= (player_speed - self.speed) * frames;
    }

    /// Whether the car has left the simulated depth window
    pub fn out_of_range(&self, tuning: &Tuning) -> bool {
        self.z < tuning.recycle_near || self.z > tuning.recycle_far
    }

    /// Screen placement for the current road bend
    pub fn project(&self, future_curve: f32) -> CarProjection {
        let road = Projection::at_depth(self.z, future_curve);
        CarProjection {
            center_x: road.lateral_x(self.x),
            y: road.y,
            width: CAR_WIDTH * road.scale,
            height: CAR_HEIGHT * road.scale,
            visible: road.on_screen(),
        }
    }
}

/// Where a car lands on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarProjection {
    pub center_x: f32,
    /// Row of the car's bottom edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Between the horizon and the screen bottom
    pub visible: bool,
}

impl CarProjection {
    pub fn footprint(&self) -> Footprint {
        Footprint {
            center_x: self.center_x,
            width: self.width,
        }
    }
}

/// A bounce between the player and one AI car
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Pool index of the car
    pub car: usize,
    /// +1 when the car was pushed right, -1 when pushed left
    pub direction: f32,
}

/// Player fields touched by collisions
#[derive(Debug)]
pub struct PlayerContact<'a> {
    pub x: &'a mut f32,
    pub speed: &'a mut f32,
}

/// Outcome of one traffic step
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TrafficStep {
    pub recycled: u32,
    pub collisions: Vec<Collision>,
}

/// Advance, recycle and collide every car in pool order.
///
/// Each car sees the player position left by the previous car's bounce.
/// Player lateral position is not reclamped after a bounce.
pub fn update_traffic(
    cars: &mut [AiCar],
    player: PlayerContact<'_>,
    future_curve: f32,
    rng: &mut impl Rng,
    tuning: &Tuning,
    frames: f32,
) -> TrafficStep {
    let mut step = TrafficStep::default();

    for (index, car) in cars.iter_mut().enumerate() {
        car.advance(*player.speed, frames);
        if car.out_of_range(tuning) {
            car.respawn(rng, tuning);
            step.recycled += 1;
        }

        if (car.z - PLAYER_Z).abs() >= tuning.collision_depth {
            continue;
        }

        let placed = car.project(future_curve);
        if !placed.footprint().overlaps(&player_footprint(*player.x)) {
            continue;
        }

        let direction = if car.x > *player.x { 1.0 } else { -1.0 };
        car.x += direction * tuning.bounce_step;
        *player.x -= direction * tuning.bounce_step * 0.5;
        *player.speed = (*player.speed - tuning.collision_slowdown).max(0.0);

        log::debug!(
            "Car {} bounced {} at z={:.1}",
            index,
            if direction > 0.0 { "right" } else { "left" },
            car.z
        );
        step.collisions.push(Collision {
            car: index,
            direction,
        });
    }

    step
}
