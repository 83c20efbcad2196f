//! Sphere primitive.

use glam::Vec3A;
use thiserror::Error;

use crate::material::Material;
use crate::primitive::Intersection;
use crate::ray::Ray;
use crate::sampling::{self, PointSample};

/// Rejected sphere radius.
#[derive(Debug, Error, PartialEq)]
#[error("sphere radius must be positive, got {0}")]
pub struct InvalidRadius(pub f32);

/// Sphere defined by center, radius and material.
#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Vec3A,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Vec3A, radius: f32, material: Material) -> Result<Self, InvalidRadius> {
        if radius <= 0.0 {
            return Err(InvalidRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            material,
        })
    }

    /// Nearest valid hit, or None.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        // The direction is unit length, so the leading quadratic
        // coefficient is 1.
        let oc = ray.origin - self.center;
        let b = 2.0 * ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;
        let (t1, t2) = solve_quadratic(b, c)?;

        // t1 <= t2: try the closer root first; the farther one covers a
        // ray starting inside the sphere.
        let t = if ray.is_valid_distance(t1) {
            t1
        } else if ray.is_valid_distance(t2) {
            t2
        } else {
            return None;
        };

        let point = ray.at(t);
        let outward_normal = (point - self.center) / self.radius;
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        Some(Intersection {
            point,
            normal: if front_face {
                outward_normal
            } else {
                -outward_normal
            },
            distance: t,
            front_face,
            material: self.material,
        })
    }

    /// Sample a point on the surface region visible from the shading
    /// point, for next-event estimation. None when the shading point is
    /// inside the sphere.
    pub fn sample_for_direct_lighting(&self, shading_point: Vec3A) -> Option<PointSample> {
        sampling::sample_visible_sphere_cap(self.center, self.radius, shading_point)
    }
}

/// Roots of t^2 + b t + c, ordered t1 <= t2. None without real roots.
fn solve_quadratic(b: f32, c: f32) -> Option<(f32, f32)> {
    let discriminant = b * b - 4.0 * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    Some(((-b - sqrt_d) / 2.0, (-b + sqrt_d) / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;
    use approx::assert_relative_eq;

    fn matte() -> Material {
        Material::diffuse(Color::ONE)
    }

    #[test]
    fn radius_must_be_positive() {
        assert_eq!(
            Sphere::new(Vec3A::ZERO, 0.0, matte()).unwrap_err(),
            InvalidRadius(0.0)
        );
        assert!(Sphere::new(Vec3A::ZERO, 1.0, matte()).is_ok());
    }

    #[test]
    fn ray_off_to_the_side_misses() {
        let sphere = Sphere::new(Vec3A::new(-1.5, 3.0, 0.0), 1.0, matte()).unwrap();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::Y);
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn sphere_behind_the_ray_origin_misses() {
        let sphere = Sphere::new(Vec3A::new(0.0, -2.0, 0.0), 1.0, matte()).unwrap();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::Y);
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn hits_an_offset_sphere_at_the_near_root() {
        let sphere = Sphere::new(Vec3A::new(-0.5, 2.0, 0.0), 1.0, matte()).unwrap();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::Y);

        let intersection = sphere.intersect(&ray).unwrap();
        let expected_y = 2.0 - (3.0f32).sqrt() / 2.0;
        assert!(intersection
            .point
            .abs_diff_eq(Vec3A::new(0.0, expected_y, 0.0), 1e-5));
        assert!(intersection.front_face);
    }

    #[test]
    fn ray_from_the_center_hits_at_the_radius() {
        let sphere = Sphere::new(Vec3A::ZERO, 2.0, matte()).unwrap();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::Y);

        let intersection = sphere.intersect(&ray).unwrap();
        assert_relative_eq!(intersection.distance, 2.0, epsilon = 1e-5);
        assert!(intersection.point.abs_diff_eq(Vec3A::new(0.0, 2.0, 0.0), 1e-5));
        // Hit from the inside: the normal points back at the ray origin.
        assert_eq!(intersection.normal, -Vec3A::Y);
        assert!(!intersection.front_face);
    }

    #[test]
    fn ray_starting_inside_uses_the_far_root() {
        let sphere = Sphere::new(Vec3A::new(0.0, -0.5, 0.0), 1.0, matte()).unwrap();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::Y);

        let intersection = sphere.intersect(&ray).unwrap();
        assert!(intersection.point.abs_diff_eq(Vec3A::new(0.0, 0.5, 0.0), 1e-5));
        assert!(!intersection.front_face);
    }

    #[test]
    fn no_nan_leaks_from_a_grazing_miss() {
        let sphere = Sphere::new(Vec3A::new(10.0, 10.0, 10.0), 0.5, matte()).unwrap();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(1.0, 0.0, 0.0));
        assert!(sphere.intersect(&ray).is_none());
    }
}
