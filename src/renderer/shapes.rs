//! Quad batching for colored rectangles

use super::Surface;
use super::vertex::Vertex;

/// Two triangles covering `(x, y, w, h)`
pub fn quad(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> [Vertex; 6] {
    let (x2, y2) = (x + w, y + h);
    [
        Vertex::new(x, y, color),
        Vertex::new(x2, y, color),
        Vertex::new(x, y2, color),
        Vertex::new(x2, y, color),
        Vertex::new(x2, y2, color),
        Vertex::new(x, y2, color),
    ]
}

/// Collects filled rects into one vertex list for a single draw call.
/// Rects entirely outside the viewport are culled.
#[derive(Debug, Clone)]
pub struct QuadBatch {
    vertices: Vec<Vertex>,
    viewport: (f32, f32),
}

impl QuadBatch {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            vertices: Vec::with_capacity(1024),
            viewport: (width, height),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 6
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl Surface for QuadBatch {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        let (vw, vh) = self.viewport;
        if w <= 0.0 || h <= 0.0 || color[3] <= 0.0 || x + w < 0.0 || y + h < 0.0 || x > vw || y > vh {
            return;
        }
        self.vertices.extend_from_slice(&quad(x, y, w, h, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_quad_corners() {
        let q = quad(10.0, 20.0, 5.0, 4.0, WHITE);
        assert_eq!(q[0].position, [10.0, 20.0]);
        assert_eq!(q[4].position, [15.0, 24.0]);
    }

    #[test]
    fn test_batch_culls_offscreen() {
        let mut batch = QuadBatch::new(320.0, 240.0);
        batch.fill_rect(10.0, 10.0, 5.0, 5.0, WHITE);
        batch.fill_rect(-50.0, 10.0, 5.0, 5.0, WHITE);
        batch.fill_rect(400.0, 10.0, 5.0, 5.0, WHITE);
        batch.fill_rect(10.0, 10.0, 5.0, 5.0, [1.0, 1.0, 1.0, 0.0]);
        assert_eq!(batch.quad_count(), 1);

        batch.clear();
        assert!(batch.vertices().is_empty());
    }
}
