//! CPU render loop.

use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use crate::camera::PerspectiveCamera;
use crate::material::Color;
use crate::sampling;
use crate::scene::Scene;

/// Render the scene from the camera's point of view.
///
/// Pixels are processed in parallel with rayon; each pixel averages
/// `samples_per_pixel` jittered camera rays. The result is a linear-light
/// f32 RGB buffer; gamma and 8-bit conversion happen at save time.
pub fn render(camera: &PerspectiveCamera, scene: &Scene) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
    let params = *scene.params();
    let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(params.width, params.height);

    info!(
        "Rendering {}x{} at {} samples per pixel on {} threads...",
        params.width,
        params.height,
        params.samples_per_pixel,
        rayon::current_num_threads()
    );
    let start = std::time::Instant::now();
    let progress = ProgressBar::new(u64::from(params.width) * u64::from(params.height));
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} ETA: {eta}")
            .unwrap(),
    );

    image.enumerate_pixels_mut().par_bridge().for_each(|(x, y, pixel)| {
        let mut color = Color::ZERO;
        for _ in 0..params.samples_per_pixel {
            let (sample_x, sample_y) = sampling::sample_pixel(x, y);
            let ray = camera.make_ray(sample_x, sample_y, params.width, params.height);
            color += scene.shoot_ray(&ray, params.max_bounces, true);
        }
        color /= params.samples_per_pixel as f32;

        *pixel = Rgb([color.x, color.y, color.z]);
        progress.inc(1);
    });

    progress.finish();
    info!("Scene rendered in {:.2?}", start.elapsed());

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Color, Material};
    use crate::params::RenderParams;
    use crate::plane::Plane;
    use crate::scene::Scene;
    use glam::Vec3A;

    #[test]
    fn renders_the_sky_where_nothing_is_hit() {
        let params = RenderParams::new(8, 8, 1, 2, true, false, 2.2).unwrap();
        let sky = Color::new(0.25, 0.5, 0.75);
        let floor = Plane::new(
            Vec3A::new(0.0, -100.0, 0.0),
            Vec3A::Y,
            Material::diffuse(Color::ONE),
        );
        let scene = Scene::new(vec![floor.into()], Vec::new(), params, sky);
        let camera = PerspectiveCamera::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, -1.0), 0.6);

        let image = render(&camera, &scene);
        assert_eq!(image.dimensions(), (8, 8));
        let Rgb([r, g, b]) = *image.get_pixel(4, 0);
        assert_eq!((r, g, b), (0.25, 0.5, 0.75));
    }
}
