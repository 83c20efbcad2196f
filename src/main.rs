use anyhow::Result;
use clap::Parser;
use glam::Vec3A;
use log::info;

use lumapath::camera::PerspectiveCamera;
use lumapath::cli::Args;
use lumapath::logger::init_logger;
use lumapath::material::{Color, Material};
use lumapath::output::save_image_as_png;
use lumapath::params::RenderParams;
use lumapath::plane::Plane;
use lumapath::primitive::Primitive;
use lumapath::random;
use lumapath::renderer;
use lumapath::scene::Scene;
use lumapath::sphere::Sphere;

/// Demo scene: a matte floor, three feature spheres and a grid of small
/// random spheres under an emissive sun sphere.
fn create_scene(params: RenderParams) -> Result<Scene> {
    let mut primitives: Vec<Primitive> = Vec::new();

    let ground = Material::diffuse(Color::new(0.5, 0.5, 0.5));
    primitives.push(Plane::new(Vec3A::ZERO, Vec3A::Y, ground).into());

    // Grid of small spheres with randomized materials
    for a in -4..4 {
        for b in -4..4 {
            let choose_mat = random::random_f32();
            let center = Vec3A::new(
                a as f32 + 0.9 * random::random_f32(),
                0.2,
                b as f32 + 0.9 * random::random_f32(),
            );

            // Keep clear of the large feature spheres
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() > 0.9 {
                let material = if choose_mat < 0.8 {
                    Material::diffuse(random::random_color() * random::random_color())
                } else if choose_mat < 0.95 {
                    Material::metal(
                        random::random_color_range(0.5, 1.0),
                        random::random_f32_range(5.0, 50.0),
                    )?
                } else {
                    Material::refractive(Color::ONE, 1.5)?
                };
                primitives.push(Sphere::new(center, 0.2, material)?.into());
            }
        }
    }

    // Three large feature spheres
    let glass = Material::refractive(Color::ONE, 1.5)?;
    primitives.push(Sphere::new(Vec3A::new(0.0, 1.0, 0.0), 1.0, glass)?.into());

    let matte = Material::diffuse(Color::new(0.4, 0.2, 0.1));
    primitives.push(Sphere::new(Vec3A::new(-4.0, 1.0, 0.0), 1.0, matte)?.into());

    let steel = Material::metal(Color::new(0.7, 0.6, 0.5), 1000.0)?;
    primitives.push(Sphere::new(Vec3A::new(4.0, 1.0, 0.0), 1.0, steel)?.into());

    let sun = Material::emissive(Color::new(1.0, 0.9, 0.7), 20.0)?;
    let lights = vec![Sphere::new(Vec3A::new(0.0, 7.0, 3.0), 1.5, sun)?.into()];

    let sky = Color::new(0.2, 0.25, 0.35);
    Ok(Scene::new(primitives, lights, params, sky))
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.debug_level.into());
    info!("LumaPath - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let params = RenderParams::new(
        args.width,
        args.height,
        args.max_bounces,
        args.samples_per_pixel,
        !args.no_nee,
        args.clamp_fireflies,
        args.gamma,
    )?;
    info!(
        "Image resolution: {}x{}, samples per pixel: {}",
        params.width, params.height, params.samples_per_pixel
    );

    let scene = create_scene(params)?;
    let camera = PerspectiveCamera::new(
        Vec3A::new(13.0, 2.0, 3.0),
        Vec3A::new(0.0, 0.5, 0.0),
        20.0f32.to_radians(),
    );

    let image = renderer::render(&camera, &scene);
    save_image_as_png(&image, &args.output, params.gamma)?;

    Ok(())
}
