//! WebGPU rendering module
//!
//! Draws the avatar and hazards as flat quads built on the CPU each frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::{Palette, Vertex};
