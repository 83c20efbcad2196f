//! Infinite plane primitive.

use glam::Vec3A;

use crate::material::Material;
use crate::primitive::Intersection;
use crate::ray::Ray;

/// Plane through `position` with unit `normal`, infinite in extent.
#[derive(Debug, Clone)]
pub struct Plane {
    pub position: Vec3A,
    pub normal: Vec3A,
    pub material: Material,
}

impl Plane {
    /// The normal is normalized here once so intersection can rely on it.
    pub fn new(position: Vec3A, normal: Vec3A, material: Material) -> Self {
        Self {
            position,
            normal: normal.normalize(),
            material,
        }
    }

    /// Nearest valid hit, or None. A ray parallel to the plane never
    /// hits; the returned normal is oriented against the ray so shading
    /// can assume it faces the viewer.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let d_dot_n = self.normal.dot(ray.direction);
        if d_dot_n == 0.0 {
            return None;
        }

        let t = self.normal.dot(self.position - ray.origin) / d_dot_n;
        if !ray.is_valid_distance(t) {
            return None;
        }

        let front_face = d_dot_n < 0.0;
        Some(Intersection {
            point: ray.at(t),
            normal: if front_face { self.normal } else { -self.normal },
            distance: t,
            front_face,
            material: self.material,
        })
    }
}
