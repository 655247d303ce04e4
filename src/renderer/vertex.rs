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

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub avatar: [f32; 4],
    pub hazard: [f32; 4],
    /// Hazard the avatar has touched
    pub hazard_hit: [f32; 4],
}

pub mod colors {
    use super::Palette;

    pub const STANDARD: Palette = Palette {
        background: [0.0, 0.0, 0.0, 1.0],
        avatar: [1.0, 1.0, 1.0, 1.0],
        hazard: [0.86, 0.15, 0.15, 1.0], // red-600
        hazard_hit: [1.0, 0.75, 0.2, 1.0],
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        background: [0.0, 0.0, 0.0, 1.0],
        avatar: [1.0, 1.0, 1.0, 1.0],
        hazard: [1.0, 0.0, 0.0, 1.0],
        hazard_hit: [1.0, 1.0, 0.0, 1.0],
    };
}
