// Vertex structure for the screen quad

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Vertex in clip space with texture coordinates
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in normalized device coordinates
    pub position: [f32; 2],
    /// Texture coordinates (UV), origin at the top-left
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec2, tex_coords: Vec2) -> Self {
        Self {
            position: position.to_array(),
            tex_coords: tex_coords.to_array(),
        }
    }

    /// Get the vertex buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Tex Coords
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Two counter-clockwise triangles covering the whole surface
pub fn screen_quad() -> ([Vertex; 4], [u16; 6]) {
    let vertices = [
        Vertex::new(Vec2::new(-1.0, 1.0), Vec2::new(0.0, 0.0)),
        Vertex::new(Vec2::new(-1.0, -1.0), Vec2::new(0.0, 1.0)),
        Vertex::new(Vec2::new(1.0, -1.0), Vec2::new(1.0, 1.0)),
        Vertex::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0)),
    ];
    let indices = [0, 1, 2, 0, 2, 3];
    (vertices, indices)
}
