use nalgebra::{Isometry3, Matrix4, Point3, Translation3, UnitQuaternion};

/// Linear RGBA color, each channel 0.0 - 1.0
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    /// Opaque color from 8 bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Color::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    pub fn as_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        wgpu::Color { r: c.r as f64, g: c.g as f64, b: c.b as f64, a: c.a as f64 }
    }
}

/// Surface properties a disk is shaded with.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Material {
    pub diffuse: Color,
    /// 0 - 128, 128 being the most shiny
    pub shininess: f32,
}

/// Position plus rotation of a disk in world space.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Transform {
    pub position: Point3<f32>,
    pub rotation: UnitQuaternion<f32>,
}

impl Transform {
    pub fn new(position: Point3<f32>, rotation: UnitQuaternion<f32>) -> Self {
        Transform { position, rotation }
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.rotation)
            .to_homogeneous()
    }
}
