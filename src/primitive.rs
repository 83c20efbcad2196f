//! Scene primitives and the intersection record.
//!
//! Shapes form a closed set and the scene dispatches on the variant with
//! a match, keeping exhaustiveness checkable at compile time.

use glam::Vec3A;

use crate::material::Material;
use crate::plane::Plane;
use crate::ray::Ray;
use crate::sampling::PointSample;
use crate::sphere::Sphere;

/// Ray-primitive intersection record.
///
/// Value type, produced fresh per query and owned by the caller.
#[derive(Debug, Clone, Copy)]
pub struct Intersection {
    /// Hit point in world coordinates.
    pub point: Vec3A,
    /// Unit surface normal, oriented against the incoming ray.
    pub normal: Vec3A,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// True when the ray hit the outside of the surface.
    pub front_face: bool,
    /// Material of the hit primitive.
    pub material: Material,
}

/// Closed set of shapes the scene can hold.
#[derive(Debug, Clone)]
pub enum Primitive {
    Plane(Plane),
    Sphere(Sphere),
}

impl Primitive {
    /// Nearest valid hit along the ray, or None.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        match self {
            Primitive::Plane(plane) => plane.intersect(ray),
            Primitive::Sphere(sphere) => sphere.intersect(ray),
        }
    }

    /// Sample a point on the surface for next-event estimation, as seen
    /// from the shading point. Only meaningful for primitives registered
    /// as emitters. Planes have no finite area to sample and always
    /// return None.
    pub fn sample_for_direct_lighting(&self, shading_point: Vec3A) -> Option<PointSample> {
        match self {
            Primitive::Plane(_) => None,
            Primitive::Sphere(sphere) => sphere.sample_for_direct_lighting(shading_point),
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Primitive::Plane(plane) => &plane.material,
            Primitive::Sphere(sphere) => &sphere.material,
        }
    }
}

impl From<Plane> for Primitive {
    fn from(plane: Plane) -> Self {
        Primitive::Plane(plane)
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;

    #[test]
    fn dispatches_intersection_to_the_wrapped_shape() {
        let matte = Material::diffuse(Color::ONE);
        let sphere: Primitive = Sphere::new(Vec3A::new(0.0, 3.0, 0.0), 1.0, matte)
            .unwrap()
            .into();
        let plane: Primitive = Plane::new(Vec3A::new(0.0, 5.0, 0.0), Vec3A::Y, matte).into();

        let ray = Ray::new(Vec3A::ZERO, Vec3A::Y);
        assert_eq!(sphere.intersect(&ray).unwrap().distance, 2.0);
        assert_eq!(plane.intersect(&ray).unwrap().distance, 5.0);
    }

    #[test]
    fn planes_cannot_be_sampled_as_emitters() {
        let light = Material::emissive(Color::ONE, 1.0).unwrap();
        let plane: Primitive = Plane::new(Vec3A::ZERO, Vec3A::Y, light).into();
        assert!(plane.sample_for_direct_lighting(Vec3A::ONE).is_none());
    }

    #[test]
    fn spheres_can_be_sampled_as_emitters() {
        crate::random::reseed(21);
        let light = Material::emissive(Color::ONE, 1.0).unwrap();
        let sphere: Primitive = Sphere::new(Vec3A::new(0.0, 4.0, 0.0), 1.0, light)
            .unwrap()
            .into();
        let sample = sphere.sample_for_direct_lighting(Vec3A::ZERO).unwrap();
        assert!(sample.pdf > 0.0);
    }
}
