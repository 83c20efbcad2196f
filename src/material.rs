//! Surface material model.
//!
//! A closed set of material kinds; the integrator branches on the variant
//! instead of going through virtual dispatch. Construction goes through
//! the validating constructors, so an invalid material never reaches the
//! render loop.

use glam::Vec3A;
use std::f32::consts::PI;
use thiserror::Error;

use crate::primitive::Intersection;
use crate::random;
use crate::ray::Ray;
use crate::sampling::{self, DirectionSample};

/// RGB radiance/reflectance triple.
pub type Color = Vec3A;

/// How a surface scatters (or emits) light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian surface, constant BRDF albedo/pi over the hemisphere.
    Diffuse { albedo: Color },
    /// Specular reflector; smoothness controls the width of the glossy
    /// lobe around the mirror direction.
    Metal { albedo: Color, smoothness: f32 },
    /// Dielectric; Fresnel-weighted choice between reflection and
    /// transmission, using the index of refraction.
    Refractive { albedo: Color, ior: f32 },
    /// Light source. Terminal: emits, never scatters.
    Emissive { albedo: Color, emission: f32 },
}

/// Rejected material parameters.
#[derive(Debug, Error, PartialEq)]
pub enum MaterialError {
    #[error("smoothness must be at least 1, got {0}")]
    Smoothness(f32),
    #[error("emission must be non-negative, got {0}")]
    Emission(f32),
    #[error("index of refraction must be positive, got {0}")]
    Ior(f32),
}

/// One sampled continuation of a light path: the next ray and the weight
/// applied to the radiance it brings back.
#[derive(Debug, Clone, Copy)]
pub struct Scatter {
    pub ray: Ray,
    pub attenuation: Color,
}

impl Material {
    pub fn diffuse(albedo: Color) -> Self {
        Material::Diffuse { albedo }
    }

    pub fn metal(albedo: Color, smoothness: f32) -> Result<Self, MaterialError> {
        if smoothness < 1.0 {
            return Err(MaterialError::Smoothness(smoothness));
        }
        Ok(Material::Metal { albedo, smoothness })
    }

    pub fn refractive(albedo: Color, ior: f32) -> Result<Self, MaterialError> {
        if ior <= 0.0 {
            return Err(MaterialError::Ior(ior));
        }
        Ok(Material::Refractive { albedo, ior })
    }

    pub fn emissive(albedo: Color, emission: f32) -> Result<Self, MaterialError> {
        if emission < 0.0 {
            return Err(MaterialError::Emission(emission));
        }
        Ok(Material::Emissive { albedo, emission })
    }

    pub fn is_emissive(&self) -> bool {
        matches!(self, Material::Emissive { .. })
    }

    /// Radiance emitted by the surface; zero for non-emissive kinds.
    pub fn emitted(&self) -> Color {
        match *self {
            Material::Emissive { albedo, emission } => albedo * emission,
            _ => Color::ZERO,
        }
    }

    /// Sample one continuation ray for an incoming ray hitting this
    /// material, with the attenuation to apply to the radiance the
    /// continuation returns. None when the material does not scatter
    /// (emissive) or the sample degenerates (pdf near zero).
    pub fn scatter(&self, ray_in: &Ray, intersection: &Intersection) -> Option<Scatter> {
        match *self {
            Material::Diffuse { albedo } => scatter_diffuse(albedo, intersection),
            Material::Metal { albedo, smoothness } => {
                Some(scatter_metal(albedo, smoothness, ray_in, intersection))
            }
            Material::Refractive { ior, .. } => Some(scatter_refractive(ior, ray_in, intersection)),
            Material::Emissive { .. } => None,
        }
    }
}

/// Cosine-weighted diffuse bounce. The explicit BRDF * cos / pdf weight
/// collapses to the albedo for this sampler.
fn scatter_diffuse(albedo: Color, intersection: &Intersection) -> Option<Scatter> {
    let DirectionSample { direction, pdf } =
        sampling::sample_hemisphere_cosine_weighted(intersection.normal);
    if pdf <= f32::EPSILON {
        return None;
    }

    let brdf = albedo / PI;
    let cos_theta = direction.dot(intersection.normal);
    Some(Scatter {
        ray: Ray::new(intersection.point, direction),
        attenuation: brdf * cos_theta / pdf,
    })
}

/// Glossy mirror bounce around the perfect reflection direction.
fn scatter_metal(
    albedo: Color,
    smoothness: f32,
    ray_in: &Ray,
    intersection: &Intersection,
) -> Scatter {
    let perfect = reflect(ray_in.direction, intersection.normal);
    let DirectionSample { mut direction, .. } = sampling::sample_hemisphere_glossy(perfect, smoothness);

    // Lobe samples that would leave through the surface are reflected
    // about the perfect direction, back above it.
    if direction.dot(intersection.normal) < 0.0 {
        direction = reflect(-direction, perfect);
    }

    Scatter {
        ray: Ray::specular(intersection.point, direction),
        attenuation: albedo,
    }
}

/// Fresnel-weighted reflection or Snell transmission. The stochastic
/// split already conserves energy, so both branches carry full weight.
fn scatter_refractive(ior: f32, ray_in: &Ray, intersection: &Intersection) -> Scatter {
    // The stored normal is oriented against the ray; front_face still
    // tells whether the ray enters or exits the medium.
    let ri = if intersection.front_face { 1.0 / ior } else { ior };

    let cos_theta = (-ray_in.direction).dot(intersection.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
    let cannot_refract = ri * sin_theta > 1.0;

    let direction = if cannot_refract || schlick_reflectance(cos_theta, ri) > random::random_f32() {
        reflect(ray_in.direction, intersection.normal)
    } else {
        refract(ray_in.direction, intersection.normal, ri)
    };

    Scatter {
        ray: Ray::specular(intersection.point, direction),
        attenuation: Color::ONE,
    }
}

/// Reflect a vector off a surface with normal n.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through an interface using Snell's law.
fn refract(uv: Vec3A, n: Vec3A, etai_over_etat: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Fresnel reflectance by Schlick's approximation.
pub fn schlick_reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
