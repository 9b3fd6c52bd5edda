//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (game pixels) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Byte stride of one vertex in an upload buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Raw bytes for a GPU buffer upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.10, 0.0, 0.20, 1.0];
    pub const GROUND: [f32; 4] = [0.35, 0.22, 0.12, 1.0];
    pub const SOLID: [f32; 4] = [0.55, 0.36, 0.20, 1.0];
    pub const ICE: [f32; 4] = [0.60, 0.85, 1.0, 1.0];
    pub const MOVING: [f32; 4] = [0.45, 0.45, 0.60, 1.0];
    pub const FIRE: [f32; 4] = [1.0, 0.45, 0.10, 1.0];

    pub const FOX: [f32; 4] = [1.0, 0.55, 0.15, 1.0];
    pub const FOX_ATTACK: [f32; 4] = [1.0, 0.85, 0.30, 1.0];
    pub const FOX_HURT: [f32; 4] = [1.0, 0.25, 0.25, 1.0];
    pub const BLADE: [f32; 4] = [0.85, 0.90, 0.95, 1.0];

    pub const GOBLIN: [f32; 4] = [0.0, 0.67, 0.0, 1.0];
    pub const RED_GOBLIN: [f32; 4] = [0.80, 0.10, 0.10, 1.0];
    pub const BAT: [f32; 4] = [0.53, 0.0, 0.67, 1.0];
    pub const BIRD: [f32; 4] = [0.30, 0.50, 0.90, 1.0];
    pub const BEETLE: [f32; 4] = [0.80, 0.53, 0.0, 1.0];
    pub const BEETLE_DAMAGED: [f32; 4] = [0.60, 0.40, 0.0, 1.0];

    pub const ENEMY_BULLET: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const PLAYER_BULLET: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const POOP: [f32; 4] = [0.90, 0.90, 0.80, 1.0];

    pub const STAR: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const MAGAZINE: [f32; 4] = [0.75, 0.75, 0.80, 1.0];
    pub const HEART: [f32; 4] = [1.0, 0.10, 0.30, 1.0];
}
