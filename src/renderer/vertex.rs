//! Vertex and instance types for 2D rendering

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
}

/// A filled screen-space rectangle, laid out for instance buffers
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DrawRect {
    /// Top-left corner in screen pixels
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl DrawRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            size: [width, height],
            color,
        }
    }

    /// Raw bytes for upload as an instance buffer
    pub fn as_bytes(rects: &[DrawRect]) -> &[u8] {
        bytemuck::cast_slice(rects)
    }
}

/// Colors for game elements
pub mod colors {
    /// #d157a0
    pub const FLOOR: [f32; 4] = [0.819, 0.341, 0.627, 1.0];
    /// #acd157
    pub const PLATFORM: [f32; 4] = [0.675, 0.819, 0.341, 1.0];
    /// #ff4646
    pub const HAZARD: [f32; 4] = [1.0, 0.275, 0.275, 1.0];
    /// #f1be32
    pub const CHECKPOINT: [f32; 4] = [0.945, 0.745, 0.196, 1.0];
    /// #99c9ff
    pub const PLAYER: [f32; 4] = [0.6, 0.788, 1.0, 1.0];
}
