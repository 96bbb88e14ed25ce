use {
    crate::types::Color,
    nalgebra::{Point3, Vector3},
    std::f32::consts::PI,
};

pub const TAU: f32 = 2.0 * PI;

/// Linear blend between two values, `t` of 0 yields `self` and 1 yields `other`.
///
/// Implemented as `a * (1 - t) + b * t` so both endpoints are hit exactly.
pub trait Lerp: Sized {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }
}

impl Lerp for Vector3<f32> {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }
}

impl Lerp for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color {
            r: self.r.lerp(&other.r, t),
            g: self.g.lerp(&other.g, t),
            b: self.b.lerp(&other.b, t),
            a: self.a.lerp(&other.a, t),
        }
    }
}

/// Point at `length` from the origin along `angle` (radians) in the XY plane.
pub fn length_at_angle(length: f32, angle: f32) -> Point3<f32> {
    let (sin, cos) = angle.sin_cos();
    Point3::new(cos * length, sin * length, 0.0)
}

/// Wraps an angle into `[0, TAU)`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
