//! Scene aggregate and the path-tracing integrator.
//!
//! `shoot_ray` is a pure function of a ray and a bounce budget against an
//! immutable scene, so it can run concurrently once per pixel sample
//! without any synchronization.

use glam::Vec3A;
use std::f32::consts::PI;

use crate::material::{Color, Material};
use crate::params::RenderParams;
use crate::primitive::{Intersection, Primitive};
use crate::ray::{Ray, MIN_RAY_DIST};

/// Holds every primitive in the scene. Emitters are kept separately
/// addressable so direct lighting can sample them explicitly, but they
/// take part in intersection queries like everything else. Read-only
/// while rendering.
pub struct Scene {
    primitives: Vec<Primitive>,
    lights: Vec<Primitive>,
    params: RenderParams,
    /// Background radiance returned when a ray escapes the scene.
    pub sky_color: Color,
}

impl Scene {
    /// `lights` holds the emissive primitives; `primitives` everything
    /// else.
    pub fn new(
        primitives: Vec<Primitive>,
        lights: Vec<Primitive>,
        params: RenderParams,
        sky_color: Color,
    ) -> Self {
        Self {
            primitives,
            lights,
            params,
            sky_color,
        }
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    /// Estimate the radiance arriving at the ray origin along `ray`.
    ///
    /// Recursion is bounded by `remaining_bounces`; truncating the path
    /// there is the single source of bias in the estimator. Camera rays
    /// pass `is_camera_ray = true` so directly visible emitters can be
    /// clamped against highlight aliasing.
    pub fn shoot_ray(&self, ray: &Ray, remaining_bounces: u32, is_camera_ray: bool) -> Color {
        let Some(intersection) = self.find_first_intersection(ray) else {
            return self.sky_color;
        };

        if intersection.material.is_emissive() {
            let emitted = intersection.material.emitted();
            if is_camera_ray {
                return emitted.clamp(Vec3A::ZERO, Vec3A::ONE);
            }
            // The direct-lighting estimate at the previous diffuse vertex
            // already counted this emitter; counting it again here would
            // double it.
            if self.params.next_event_estimation && !ray.is_specular() {
                return Color::ZERO;
            }
            return emitted;
        }

        let direct = if self.params.next_event_estimation {
            self.compute_direct_diffuse_lighting(&intersection)
        } else {
            Color::ZERO
        };

        if remaining_bounces == 0 {
            return direct;
        }

        direct + self.compute_indirect_lighting(&intersection, ray, remaining_bounces - 1)
    }

    /// Nearest valid hit over all primitives, emitters included. Linear
    /// scan, O(n) per query.
    pub fn find_first_intersection(&self, ray: &Ray) -> Option<Intersection> {
        let mut closest: Option<Intersection> = None;
        for primitive in self.primitives.iter().chain(self.lights.iter()) {
            if let Some(intersection) = primitive.intersect(ray) {
                if closest
                    .as_ref()
                    .map_or(true, |c| intersection.distance < c.distance)
                {
                    closest = Some(intersection);
                }
            }
        }
        closest
    }

    /// Next-event estimation: sample every emitter from the shading
    /// point and sum the unoccluded contributions. Only the Lambertian
    /// lobe picks up sampled lights; metals and dielectrics get their
    /// lighting through specular continuations.
    fn compute_direct_diffuse_lighting(&self, intersection: &Intersection) -> Color {
        let Material::Diffuse { albedo } = intersection.material else {
            return Color::ZERO;
        };
        let brdf = albedo / PI;

        let mut total = Color::ZERO;
        for light in &self.lights {
            let Some(sample) = light.sample_for_direct_lighting(intersection.point) else {
                continue;
            };

            let to_light = sample.point - intersection.point;
            let distance_squared = to_light.length_squared();
            if sample.pdf <= f32::EPSILON || distance_squared <= MIN_RAY_DIST * MIN_RAY_DIST {
                continue;
            }
            let distance = distance_squared.sqrt();
            let to_light_dir = to_light / distance;

            let light_dot_n = to_light_dir.dot(intersection.normal);
            if light_dot_n <= 0.0 {
                continue;
            }

            let mut shadow_ray = Ray::new(intersection.point, to_light_dir);
            // Stop just short of the sampled point so the emitter cannot
            // occlude itself.
            shadow_ray.max_dist = distance - MIN_RAY_DIST;
            if self.find_first_intersection(&shadow_ray).is_some() {
                continue;
            }

            let cos_at_light = sample.normal.dot(-to_light_dir);
            let li = cos_at_light * light.material().emitted();
            total += brdf * li * light_dot_n / (sample.pdf * distance_squared);
        }
        total
    }

    /// Spawn the single stochastic continuation of the path and weight
    /// the radiance it returns.
    fn compute_indirect_lighting(
        &self,
        intersection: &Intersection,
        ray: &Ray,
        remaining_bounces: u32,
    ) -> Color {
        let Some(scatter) = intersection.material.scatter(ray, intersection) else {
            return Color::ZERO;
        };

        let incoming = self.shoot_ray(&scatter.ray, remaining_bounces, false);
        let incoming = if self.params.fireflies_clamping {
            incoming.min(Vec3A::ONE)
        } else {
            incoming
        };

        incoming * scatter.attenuation
    }
}
