//! WebGPU rendering module
//!
//! The scene is built on the CPU as colored triangles in canvas space and
//! drawn with a single flat-color pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::Scenery;
pub use vertex::Vertex;
