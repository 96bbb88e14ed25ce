use nalgebra::{Point3, Vector3};

/// CPU side triangle soup, rebuilt every frame.
///
/// Storage is cleared rather than dropped between frames, so once the buffer has grown to fit a
/// disk no further allocation happens.
#[derive(Debug, Default, Clone)]
pub struct RenderBuffer {
    vertices: Vec<Point3<f32>>,
    normals: Vec<Vector3<f32>>,
    indices: Vec<u32>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grows storage to hold at least `vertex_count` vertices. Never shrinks.
    pub fn ensure_capacity(&mut self, vertex_count: usize) {
        if self.vertices.capacity() < vertex_count {
            let additional = vertex_count - self.vertices.len();
            self.vertices.reserve(additional);
            self.normals.reserve(vertex_count - self.normals.len());
            self.indices.reserve(vertex_count - self.indices.len());
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.normals.clear();
        self.indices.clear();
    }

    /// Appends a flat shaded triangle; all three corners share `normal`.
    pub fn append_triangle(&mut self, corners: [Point3<f32>; 3], normal: Vector3<f32>) {
        for corner in corners {
            self.indices.push(self.vertices.len() as u32);
            self.vertices.push(corner);
            self.normals.push(normal);
        }
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn capacity(&self) -> usize {
        self.vertices.capacity()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(z: f32) -> [Point3<f32>; 3] {
        [Point3::new(0.0, 0.0, z), Point3::new(1.0, 0.0, z), Point3::new(0.0, 1.0, z)]
    }

    #[test]
    fn append_indexes_sequentially() {
        let mut buffer = RenderBuffer::new();
        buffer.append_triangle(triangle(0.0), Vector3::z());
        buffer.append_triangle(triangle(1.0), Vector3::x());

        assert_eq!(buffer.len(), 6);
        assert_eq!(buffer.indices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(buffer.normals()[2], Vector3::z());
        assert_eq!(buffer.normals()[3], Vector3::x());
        assert_eq!(buffer.vertices()[4], Point3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buffer = RenderBuffer::new();
        buffer.ensure_capacity(300);
        let capacity = buffer.capacity();
        assert!(capacity >= 300);

        for _ in 0..100 {
            buffer.append_triangle(triangle(0.0), Vector3::z());
        }
        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.indices().is_empty());
        assert_eq!(buffer.capacity(), capacity);

        buffer.ensure_capacity(10);
        assert_eq!(buffer.capacity(), capacity);
    }
}
