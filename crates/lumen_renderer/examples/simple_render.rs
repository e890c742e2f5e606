//! Simple path tracer example.
//!
//! Builds a small scene by hand, renders it and saves to PPM format.

use lumen_core::{CameraConfig, RenderSettings};
use lumen_renderer::{render, save, Camera, Color, Material, Scene, Sphere, Vec3};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let start = std::time::Instant::now();
    let world = build_scene();
    log::info!("Scene built in {:?} ({} objects)", start.elapsed(), world.len());

    let settings = RenderSettings::default()
        .with_resolution(800, 16.0 / 9.0)
        .with_quality(50, 10)
        .with_seed(7);

    let config = CameraConfig::default()
        .with_position(
            Vec3::new(13.0, 2.0, 3.0), // look_from
            Vec3::new(0.0, 0.0, 0.0),  // look_at
            Vec3::new(0.0, 1.0, 0.0),  // vup
        )
        .with_lens(20.0, 0.6, 10.0);
    let camera = Camera::new(&config, settings.aspect_ratio);

    let image = render(&camera, &world, &settings)?;

    let filename = "output.ppm";
    save(&image, filename)?;
    Ok(())
}

fn build_scene() -> Scene {
    let mut world = Scene::new();

    // Ground
    world.add(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Color::new(0.5, 0.5, 0.5)),
    ));

    // Three main spheres
    world.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, Material::dielectric(1.5)));
    world.add(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Material::lambertian(Color::new(0.4, 0.2, 0.1)),
    ));
    world.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(0.7, 0.6, 0.5), 0.0),
    ));

    world
}
