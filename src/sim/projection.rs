//! Pseudo-3D perspective projection
//!
//! One function maps a normalized depth to screen geometry; road scanlines,
//! AI car placement and collision footprints all go through it so what is
//! drawn and what collides never disagree.

use crate::consts::*;
use crate::lerp;

/// Screen geometry of one depth slice of the road
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Normalized depth: 0 at the horizon, 1 at the bottom of the screen
    pub scale: f32,
    /// Screen row
    pub y: f32,
    /// Road width on that row
    pub road_width: f32,
    /// Road center on that row (curvature applied)
    pub center_x: f32,
}

impl Projection {
    /// Project a normalized depth.
    ///
    /// Curvature displacement eases in quadratically: nothing at the
    /// horizon, the full `future_curve` at unit scale.
    pub fn at_scale(scale: f32, future_curve: f32) -> Self {
        let road_width = lerp(ROAD_TOP_WIDTH, ROAD_BOTTOM_WIDTH, scale);
        let dx = future_curve * (1.0 - scale).powi(2);
        Self {
            scale,
            y: HORIZON_Y + ROAD_HALF_HEIGHT * scale,
            road_width,
            center_x: CANVAS_WIDTH / 2.0 + dx,
        }
    }

    /// Project a world depth. Callers keep `z` positive.
    pub fn at_depth(z: f32, future_curve: f32) -> Self {
        debug_assert!(z > 0.0, "projected depth must be positive, got {z}");
        Self::at_scale(REFERENCE_DEPTH / z, future_curve)
    }

    /// Screen x of something `lateral` road half-widths from the center
    #[inline]
    pub fn lateral_x(&self, lateral: f32) -> f32 {
        self.center_x + lateral * self.road_width * 0.5
    }

    /// Left edge of the road
    #[inline]
    pub fn road_left(&self) -> f32 {
        self.center_x - self.road_width / 2.0
    }

    /// Whether the row lies strictly between the horizon and the screen bottom
    #[inline]
    pub fn on_screen(&self) -> bool {
        self.y > HORIZON_Y && self.y < CANVAS_HEIGHT
    }
}

/// Horizontal screen extent of a vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub center_x: f32,
    pub width: f32,
}

impl Footprint {
    /// Whether two footprints overlap horizontally
    pub fn overlaps(&self, other: &Footprint) -> bool {
        (self.center_x - other.center_x).abs() < (self.width + other.width) / 2.0
    }
}

/// Footprint of the player's car at its fixed reference depth.
///
/// The player is placed on the bottom road width and ignores curvature.
pub fn player_footprint(player_x: f32) -> Footprint {
    Footprint {
        center_x: CANVAS_WIDTH / 2.0 + player_x * ROAD_BOTTOM_WIDTH * 0.25,
        width: CAR_WIDTH * (REFERENCE_DEPTH / PLAYER_Z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_depth_projects_to_center() {
        let p = Projection::at_depth(300.0, 0.0);
        assert_eq!(p.scale, 1.0);
        assert_eq!(p.lateral_x(0.0), CANVAS_WIDTH / 2.0);
        assert_eq!(p.y, CANVAS_HEIGHT);
        assert_eq!(p.road_width, ROAD_BOTTOM_WIDTH);
    }

    #[test]
    fn test_horizon_ignores_curve() {
        let p = Projection::at_scale(0.0, 50.0);
        assert_eq!(p.y, HORIZON_Y);
        assert_eq!(p.road_width, ROAD_TOP_WIDTH);
        assert_eq!(p.center_x, CANVAS_WIDTH / 2.0 + 50.0);
    }

    #[test]
    fn test_curve_fades_toward_viewer() {
        // Quadratic easing: half way down carries a quarter of the bend
        let p = Projection::at_scale(0.5, 40.0);
        assert!((p.center_x - (CANVAS_WIDTH / 2.0 + 10.0)).abs() < 1e-4);
        let near = Projection::at_scale(1.0, 40.0);
        assert_eq!(near.center_x, CANVAS_WIDTH / 2.0);
    }

    #[test]
    fn test_lateral_offset_uses_half_width() {
        let p = Projection::at_scale(1.0, 0.0);
        assert_eq!(p.lateral_x(1.0), CANVAS_WIDTH / 2.0 + ROAD_BOTTOM_WIDTH / 2.0);
        assert_eq!(p.lateral_x(-1.0), CANVAS_WIDTH / 2.0 - ROAD_BOTTOM_WIDTH / 2.0);
    }

    #[test]
    fn test_visibility_band() {
        assert!(Projection::at_depth(600.0, 0.0).on_screen());
        // Closer than the reference depth lands below the screen
        assert!(!Projection::at_depth(100.0, 0.0).on_screen());
        assert!(!Projection::at_scale(0.0, 0.0).on_screen());
    }

    #[test]
    fn test_player_footprint() {
        let fp = player_footprint(0.0);
        assert_eq!(fp.center_x, CANVAS_WIDTH / 2.0);
        assert_eq!(fp.width, 90.0);
        assert_eq!(player_footprint(1.0).center_x, CANVAS_WIDTH / 2.0 + 100.0);
    }

    #[test]
    fn test_footprint_overlap() {
        let a = Footprint { center_x: 100.0, width: 20.0 };
        let b = Footprint { center_x: 115.0, width: 20.0 };
        let c = Footprint { center_x: 120.0, width: 20.0 };
        assert!(a.overlaps(&b));
        // Touching edges do not count
        assert!(!a.overlaps(&c));
    }

    proptest! {
        #[test]
        fn prop_projection_is_deterministic(
            z in 1.0f32..2000.0,
            curve in -500.0f32..500.0,
            lateral in -1.5f32..1.5,
        ) {
            let a = Projection::at_depth(z, curve);
            let b = Projection::at_depth(z, curve);
            prop_assert_eq!(a, b);
            prop_assert_eq!(a.lateral_x(lateral), b.lateral_x(lateral));
        }

        #[test]
        fn prop_farther_is_higher_and_narrower(z in 50.0f32..1500.0, dz in 1.0f32..500.0) {
            let near = Projection::at_depth(z, 0.0);
            let far = Projection::at_depth(z + dz, 0.0);
            prop_assert!(far.y < near.y);
            prop_assert!(far.road_width < near.road_width);
        }
    }
}
