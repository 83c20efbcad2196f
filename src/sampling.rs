//! Sampling kernels for the integrator.
//!
//! Every kernel returns its sample together with the probability density
//! it was drawn with, so estimators can divide the density back out and
//! stay unbiased. Directions carry a solid-angle pdf, points an area pdf.

use glam::Vec3A;
use std::f32::consts::{PI, TAU};

use crate::random;

/// A sampled direction and its pdf under solid-angle measure.
#[derive(Debug, Clone, Copy)]
pub struct DirectionSample {
    pub direction: Vec3A,
    pub pdf: f32,
}

/// A sampled surface point, its normal, and its pdf under area measure.
#[derive(Debug, Clone, Copy)]
pub struct PointSample {
    pub point: Vec3A,
    pub normal: Vec3A,
    pub pdf: f32,
}

/// Returns the zenith direction rotated by polar angle theta and azimuth
/// phi in its local spherical frame. The azimuth reference is arbitrary;
/// all callers are isotropic around the zenith.
fn spherical_coords_rotation(zenith: Vec3A, theta: f32, phi: f32) -> Vec3A {
    // One of the many ways to get an orthogonal basis from the zenith
    // direction; falls back to X when the zenith sits on the Z axis.
    let u = Vec3A::new(-zenith.y, zenith.x, 0.0)
        .try_normalize()
        .unwrap_or(Vec3A::X);
    let v = zenith.cross(u);
    let sin_theta = theta.sin();

    theta.cos() * zenith + sin_theta * phi.cos() * u + sin_theta * phi.sin() * v
}

/// Cosine-weighted hemisphere sample around the given normal.
/// pdf = cos(theta) / pi.
pub fn sample_hemisphere_cosine_weighted(normal: Vec3A) -> DirectionSample {
    let cos_theta = random::random_f32().sqrt();
    let theta = cos_theta.acos();
    let phi = TAU * random::random_f32();

    DirectionSample {
        direction: spherical_coords_rotation(normal, theta, phi),
        pdf: cos_theta / PI,
    }
}

/// Glossy lobe around an axis, usually the perfect reflection direction.
/// The polar cosine is drawn as u^(1/smoothness): smoothness 1 spreads
/// the lobe over the hemisphere, large exponents collapse it onto the
/// axis. pdf = smoothness * cos(theta)^(smoothness - 1) / (2 pi).
pub fn sample_hemisphere_glossy(axis: Vec3A, smoothness: f32) -> DirectionSample {
    let cos_theta = random::random_f32().powf(1.0 / smoothness);
    let theta = cos_theta.acos();
    let phi = TAU * random::random_f32();

    DirectionSample {
        direction: spherical_coords_rotation(axis, theta, phi),
        pdf: smoothness * cos_theta.powf(smoothness - 1.0) / TAU,
    }
}

/// Uniformly samples the cap of the sphere (center, radius) that is
/// visible from the viewer: the region bounded by the tangent circle,
/// equivalently the cone of half-angle asin(radius / distance) subtended
/// at the viewer. pdf = 1 / cap area. Returns None when the viewer is
/// inside the sphere.
pub fn sample_visible_sphere_cap(center: Vec3A, radius: f32, viewer: Vec3A) -> Option<PointSample> {
    let to_viewer = viewer - center;
    let dist = to_viewer.length();
    if dist <= radius {
        return None;
    }

    // Polar angle at the sphere center between the viewer axis and the
    // tangent circle.
    let cos_alpha_max = radius / dist;
    let theta = (1.0 - random::random_f32() * (1.0 - cos_alpha_max)).acos();
    let phi = TAU * random::random_f32();

    let normal = spherical_coords_rotation(to_viewer / dist, theta, phi);
    let pdf = 1.0 / (TAU * (1.0 - cos_alpha_max) * radius * radius);

    Some(PointSample {
        point: center + radius * normal,
        normal,
        pdf,
    })
}

/// Jittered sample within the pixel at (x, y), to prevent aliasing.
pub fn sample_pixel(x: u32, y: u32) -> (f32, f32) {
    (
        x as f32 + random::random_f32() - 0.5,
        y as f32 + random::random_f32() - 0.5,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cosine_weighted_samples_stay_above_the_surface() {
        random::reseed(1);
        let normal = Vec3A::new(1.0, 2.0, -0.5).normalize();
        for _ in 0..1000 {
            let sample = sample_hemisphere_cosine_weighted(normal);
            let cos_theta = sample.direction.dot(normal);
            assert!(cos_theta >= 0.0);
            assert_relative_eq!(sample.direction.length(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(sample.pdf, cos_theta / PI, epsilon = 1e-5);
        }
    }

    #[test]
    fn cosine_weighted_sampling_is_unbiased() {
        // Estimate the hemisphere integral of cos^2(theta), analytically
        // 2 pi / 3, by importance sampling with the cosine-weighted pdf.
        random::reseed(2);
        let normal = Vec3A::Y;
        let n = 200_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            let sample = sample_hemisphere_cosine_weighted(normal);
            let cos_theta = sample.direction.dot(normal).max(0.0);
            sum += f64::from(cos_theta * cos_theta / sample.pdf);
        }
        let estimate = sum / f64::from(n);
        let analytic = 2.0 * std::f64::consts::PI / 3.0;
        assert!(
            (estimate - analytic).abs() / analytic < 0.02,
            "estimate {estimate} too far from {analytic}"
        );
    }

    #[test]
    fn cosine_weighted_handles_zenith_aligned_normals() {
        random::reseed(3);
        for normal in [Vec3A::Z, -Vec3A::Z] {
            let sample = sample_hemisphere_cosine_weighted(normal);
            assert!(sample.direction.is_finite());
            assert!(sample.direction.dot(normal) >= 0.0);
        }
    }

    #[test]
    fn glossy_lobe_tightens_with_smoothness() {
        random::reseed(4);
        let axis = Vec3A::new(0.3, 1.0, 0.2).normalize();
        for _ in 0..200 {
            let sample = sample_hemisphere_glossy(axis, 10_000.0);
            assert!(sample.direction.dot(axis) > 0.999);
        }
    }

    #[test]
    fn glossy_samples_stay_within_the_lobe_hemisphere() {
        random::reseed(5);
        let axis = Vec3A::X;
        for _ in 0..1000 {
            let sample = sample_hemisphere_glossy(axis, 1.0);
            assert!(sample.direction.dot(axis) >= 0.0);
            assert!(sample.pdf > 0.0);
        }
    }

    #[test]
    fn sphere_cap_samples_lie_on_the_visible_side() {
        random::reseed(6);
        let center = Vec3A::new(0.0, 4.0, 0.0);
        let radius = 1.0;
        let viewer = Vec3A::ZERO;
        let axis = (viewer - center).normalize();
        let cos_alpha_max = radius / 4.0;
        for _ in 0..1000 {
            let sample = sample_visible_sphere_cap(center, radius, viewer).unwrap();
            assert_relative_eq!((sample.point - center).length(), radius, epsilon = 1e-4);
            assert!(sample.normal.dot(axis) >= cos_alpha_max - 1e-5);
            assert_relative_eq!(
                sample.pdf,
                1.0 / (TAU * (1.0 - cos_alpha_max) * radius * radius),
                epsilon = 1e-5
            );
        }
    }

    #[test]
    fn sphere_cap_rejects_a_viewer_inside_the_sphere() {
        assert!(sample_visible_sphere_cap(Vec3A::ZERO, 2.0, Vec3A::X).is_none());
    }

    #[test]
    fn pixel_samples_jitter_within_half_a_pixel() {
        random::reseed(8);
        for _ in 0..100 {
            let (x, y) = sample_pixel(10, 20);
            assert!((9.5..10.5).contains(&x));
            assert!((19.5..20.5).contains(&y));
        }
    }
}
