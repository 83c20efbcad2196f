//! Ray representation for path tracing.
//!
//! A ray is defined as r(t) = origin + t * direction. Hit distances are
//! only valid in the open interval (MIN_RAY_DIST, max_dist).

use glam::Vec3A;

/// Smallest valid hit distance. Keeps secondary rays from re-hitting the
/// surface they just left ("shadow acne").
pub const MIN_RAY_DIST: f32 = 1e-3;

/// Default maximum ray distance.
pub const MAX_RAY_DIST: f32 = 1.0e30;

/// Ray in 3D space defined by origin and direction.
///
/// The direction is normalized at construction. The specular flag records
/// what kind of scattering event spawned the ray; the integrator reads it
/// to avoid counting direct light twice under next-event estimation.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3A,
    /// Unit direction of the ray.
    pub direction: Vec3A,
    /// Hits beyond this distance are rejected.
    pub max_dist: f32,
    is_specular: bool,
}

impl Ray {
    /// Create a ray spawned by a diffuse event (or a camera).
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            max_dist: MAX_RAY_DIST,
            is_specular: false,
        }
    }

    /// Create a ray spawned by a mirror, glossy or refractive event.
    pub fn specular(origin: Vec3A, direction: Vec3A) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            max_dist: MAX_RAY_DIST,
            is_specular: true,
        }
    }

    /// Whether this ray resulted from a specular scattering event.
    /// Fixed at construction.
    pub fn is_specular(&self) -> bool {
        self.is_specular
    }

    /// Compute the point at parameter t along the ray.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }

    /// Whether t lies in the valid hit range (MIN_RAY_DIST, max_dist).
    pub fn is_valid_distance(&self, t: f32) -> bool {
        t > MIN_RAY_DIST && t < self.max_dist
    }
}
