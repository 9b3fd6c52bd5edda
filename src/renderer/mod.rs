//! Rendering capability
//!
//! The simulation knows nothing about pixels on screen. Entities implement
//! `Draw` against an abstract `Surface`; the stock `QuadBatch` surface turns
//! those calls into vertices for a GPU upload.

pub mod shapes;
pub mod sprites;
pub mod vertex;

use glam::Vec2;

pub use shapes::QuadBatch;
pub use sprites::draw_scene;
pub use vertex::Vertex;

/// Anything that can fill an axis-aligned rect (screen pixels)
pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]);
}

/// Something that knows how to draw itself, offset by the camera
pub trait Draw {
    fn draw(&self, surface: &mut dyn Surface, camera: Vec2);
}
