//! Pinhole perspective camera.

use glam::Vec3A;

use crate::ray::Ray;

/// Maps pixel coordinates to primary rays. Pure; the pixel loop lives in
/// the renderer module.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    location: Vec3A,
    forward: Vec3A,
    right: Vec3A,
    up: Vec3A,
    max_v: f32,
}

impl PerspectiveCamera {
    /// `vfov` is the vertical field of view in radians. The camera basis
    /// is built with world Y as the up guide.
    pub fn new(location: Vec3A, target: Vec3A, vfov: f32) -> Self {
        let forward = (target - location).normalize();
        let right = forward.cross(Vec3A::Y).normalize();
        let up = right.cross(forward);
        Self {
            location,
            forward,
            right,
            up,
            max_v: (vfov / 2.0).tan(),
        }
    }

    pub fn location(&self) -> Vec3A {
        self.location
    }

    /// Primary ray through pixel coordinate (x, y) of a width x height
    /// image. Fractional coordinates give subpixel positions.
    pub fn make_ray(&self, x: f32, y: f32, width: u32, height: u32) -> Ray {
        let u = 2.0 * (x - width as f32 / 2.0) / height as f32;
        let v = 2.0 * (height as f32 / 2.0 - y) / height as f32;
        let direction = self.forward + u * self.max_v * self.right + v * self.max_v * self.up;
        Ray::new(self.location, direction)
    }
}
