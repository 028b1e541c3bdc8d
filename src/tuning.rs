//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here. Rates are given
//! per reference frame (1/60 s); the tick scales them by elapsed time.

use serde::{Deserialize, Serialize};

/// Rejected tuning data
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("Failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be within [0, 1] (got {value})")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("{field} must be at least recycle_near ({near}), got {value}")]
    NearerThanRecycle {
        field: &'static str,
        value: f32,
        near: f32,
    },

    #[error("Empty range for {field}: {min}..{max}")]
    EmptyRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub max_speed: f32,
    /// Speed gained per frame while accelerating
    pub acceleration: f32,
    /// Speed lost per frame while braking
    pub braking: f32,
    /// Lateral movement per frame while steering
    pub steer_rate: f32,

    // === Road ===
    /// Road scroll per unit of speed per frame
    pub road_scroll: f32,
    /// Seconds between bends
    pub curve_interval_min: f32,
    pub curve_interval_max: f32,
    /// Magnitude of a fresh bend (sign is random)
    pub curve_strength: f32,
    /// Per-frame multiplier pulling the bend target back to straight
    pub curve_target_decay: f32,
    /// Targets smaller than this snap to zero
    pub curve_snap_threshold: f32,
    /// Low-pass rate of the curve velocity toward the target
    pub curve_delta_rate: f32,
    /// Low-pass rate of the lookahead curve toward the curve
    pub future_curve_rate: f32,

    // === Traffic ===
    /// Cars outside [recycle_near, recycle_far] are respawned
    pub recycle_near: f32,
    pub recycle_far: f32,
    pub spawn_z_min: f32,
    pub spawn_z_max: f32,
    /// Depth range for the very first cars
    pub initial_z_min: f32,
    pub initial_z_max: f32,
    pub car_speed_min: f32,
    pub car_speed_max: f32,

    // === Collisions ===
    /// Depth window around the player where contact is possible
    pub collision_depth: f32,
    /// Lateral push applied to the car (player gets half, opposite sign)
    pub bounce_step: f32,
    /// Speed lost per colliding step
    pub collision_slowdown: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_speed: 8.0,
            acceleration: 0.1,
            braking: 0.1,
            steer_rate: 0.05,

            road_scroll: 2.0,
            curve_interval_min: 20.0,
            curve_interval_max: 45.0,
            curve_strength: 1.5,
            curve_target_decay: 0.98,
            curve_snap_threshold: 0.1,
            curve_delta_rate: 0.05,
            future_curve_rate: 0.1,

            recycle_near: 50.0,
            recycle_far: 1000.0,
            spawn_z_min: 1000.0,
            spawn_z_max: 1500.0,
            initial_z_min: 200.0,
            initial_z_max: 1000.0,
            car_speed_min: 2.0,
            car_speed_max: 5.0,

            collision_depth: 30.0,
            bounce_step: 0.1,
            collision_slowdown: 0.1,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every range is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("max_speed", self.max_speed),
            ("curve_interval_min", self.curve_interval_min),
            ("collision_depth", self.collision_depth),
        ] {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        for (field, value) in [
            ("curve_target_decay", self.curve_target_decay),
            ("curve_delta_rate", self.curve_delta_rate),
            ("future_curve_rate", self.future_curve_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::OutOfUnitRange { field, value });
            }
        }

        for (field, min, max) in [
            ("curve_interval", self.curve_interval_min, self.curve_interval_max),
            ("recycle", self.recycle_near, self.recycle_far),
            ("spawn_z", self.spawn_z_min, self.spawn_z_max),
            ("initial_z", self.initial_z_min, self.initial_z_max),
            ("car_speed", self.car_speed_min, self.car_speed_max),
        ] {
            if min >= max {
                return Err(TuningError::EmptyRange { field, min, max });
            }
        }

        // Cars must never be placed at or behind the viewer
        if self.recycle_near <= 0.0 {
            return Err(TuningError::NotPositive {
                field: "recycle_near",
                value: self.recycle_near,
            });
        }
        for (field, value) in [
            ("spawn_z_min", self.spawn_z_min),
            ("initial_z_min", self.initial_z_min),
        ] {
            if value < self.recycle_near {
                return Err(TuningError::NearerThanRecycle {
                    field,
                    value,
                    near: self.recycle_near,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_override() {
        let tuning = Tuning::from_json(r#"{ "max_speed": 12.0 }"#).unwrap();
        assert_eq!(tuning.max_speed, 12.0);
        assert_eq!(tuning.acceleration, Tuning::default().acceleration);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_empty_spawn_range() {
        let err = Tuning::from_json(r#"{ "spawn_z_min": 1500.0, "spawn_z_max": 1000.0 }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::EmptyRange { field: "spawn_z", .. }));
    }

    #[test]
    fn test_rejects_spawn_behind_viewer() {
        let err = Tuning::from_json(r#"{ "spawn_z_min": -200.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NearerThanRecycle { field: "spawn_z_min", .. }
        ));
    }

    #[test]
    fn test_rejects_initial_cars_inside_recycle_zone() {
        let tuning = Tuning {
            initial_z_min: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NearerThanRecycle { field: "initial_z_min", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_filter_rate() {
        let tuning = Tuning {
            future_curve_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::OutOfUnitRange { .. })
        ));
    }
}
