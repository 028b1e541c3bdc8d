//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in canvas coordinates
//! (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned filled rectangle
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    gradient_rect(out, min, size, color, color);
}

/// Rectangle blending from `top` to `bottom` color
pub fn gradient_rect(
    out: &mut Vec<Vertex>,
    min: Vec2,
    size: Vec2,
    top: [f32; 4],
    bottom: [f32; 4],
) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let max = min + size;

    // Two triangles
    out.push(Vertex::new(min.x, min.y, top));
    out.push(Vertex::new(max.x, min.y, top));
    out.push(Vertex::new(min.x, max.y, bottom));

    out.push(Vertex::new(min.x, max.y, bottom));
    out.push(Vertex::new(max.x, min.y, top));
    out.push(Vertex::new(max.x, max.y, bottom));
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}
