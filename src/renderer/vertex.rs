//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Opaque color from a 0xRRGGBB literal
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const SKY_TOP: [f32; 4] = rgb(0x000022);
    pub const SKY_HORIZON: [f32; 4] = rgb(0x110033);
    pub const STAR: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
    pub const CLOUD: [f32; 4] = [0.35, 0.2, 0.5, 0.35];
    pub const BUILDING: [f32; 4] = rgb(0x222222);
    pub const WINDOW_LIT: [f32; 4] = rgb(0xffcc55);
    pub const GRASS: [f32; 4] = rgb(0x002200);
    pub const ROAD: [f32; 4] = rgb(0x111111);
    pub const LANE_MARKER: [f32; 4] = rgb(0xff00ff);
    pub const AI_CAR: [f32; 4] = rgb(0x00ffff);
    pub const PLAYER_BODY: [f32; 4] = rgb(0xff0000);
    pub const PLAYER_WINDOW: [f32; 4] = rgb(0x000000);
    pub const DASHBOARD: [f32; 4] = rgb(0x111111);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb(0x00ff00), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(rgb(0x000000), [0.0, 0.0, 0.0, 1.0]);
    }
}
