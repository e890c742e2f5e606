//! Built-in scenes.
//!
//! These are plain [`SceneDescription`] values, so they can be dumped to
//! JSON, edited and loaded back.

use lumen_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scene::{MaterialDesc, SceneDescription};
use crate::settings::{CameraConfig, RenderSettings};

/// Names accepted by [`builtin`].
pub const BUILTIN_SCENES: &[&str] = &["random-spheres", "three-spheres", "single-sphere"];

/// Look up a built-in scene by name.
///
/// `seed` only affects procedurally generated scenes.
pub fn builtin(name: &str, seed: u64) -> Option<SceneDescription> {
    match name {
        "random-spheres" => Some(random_spheres(seed)),
        "three-spheres" => Some(three_spheres()),
        "single-sphere" => Some(single_sphere()),
        _ => None,
    }
}

/// The field of small random spheres around three large ones.
///
/// A 22x22 grid of radius 0.2 spheres, jittered within their cells:
/// 80% diffuse, 15% metal, 5% glass. Cells too close to the large metal
/// sphere are left empty.
pub fn random_spheres(seed: u64) -> SceneDescription {
    let camera = CameraConfig::default()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0);

    let mut scene = SceneDescription::new(camera);
    scene.settings = Some(
        RenderSettings::default()
            .with_resolution(1200, 3.0 / 2.0)
            .with_quality(500, 50),
    );

    scene.add_material(
        "ground",
        MaterialDesc::Lambertian {
            albedo: Vec3::splat(0.5),
        },
    );
    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, "ground");

    scene.add_material("glass", MaterialDesc::Dielectric { refractive_index: 1.5 });

    let mut rng = StdRng::seed_from_u64(seed);
    let keep_clear = Vec3::new(4.0, 0.2, 0.0);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - keep_clear).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_color(&mut rng, 0.0, 1.0) * random_color(&mut rng, 0.0, 1.0);
                let name = format!("diffuse_{}_{}", a, b);
                scene.add_material(name.as_str(), MaterialDesc::Lambertian { albedo });
                scene.add_sphere(center, 0.2, name);
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_color(&mut rng, 0.5, 1.0);
                let fuzz = rng.gen_range(0.0..0.5);
                let name = format!("metal_{}_{}", a, b);
                scene.add_material(name.as_str(), MaterialDesc::Metal { albedo, fuzz });
                scene.add_sphere(center, 0.2, name);
            } else {
                scene.add_sphere(center, 0.2, "glass");
            }
        }
    }

    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, "glass");

    scene.add_material(
        "brown",
        MaterialDesc::Lambertian {
            albedo: Vec3::new(0.4, 0.2, 0.1),
        },
    );
    scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, "brown");

    scene.add_material(
        "mirror",
        MaterialDesc::Metal {
            albedo: Vec3::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        },
    );
    scene.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, "mirror");

    scene
}

/// Ground plane with a diffuse, a hollow glass and a metal sphere in a row.
pub fn three_spheres() -> SceneDescription {
    let mut scene = SceneDescription::new(CameraConfig::default());

    scene.add_material(
        "ground",
        MaterialDesc::Lambertian {
            albedo: Vec3::new(0.8, 0.8, 0.0),
        },
    );
    scene.add_material(
        "center",
        MaterialDesc::Lambertian {
            albedo: Vec3::new(0.1, 0.2, 0.5),
        },
    );
    scene.add_material("glass", MaterialDesc::Dielectric { refractive_index: 1.5 });
    // Air inside glass: the inner sphere turns the left ball into a bubble
    scene.add_material(
        "bubble",
        MaterialDesc::Dielectric {
            refractive_index: 1.0 / 1.5,
        },
    );
    scene.add_material(
        "gold",
        MaterialDesc::Metal {
            albedo: Vec3::new(0.8, 0.6, 0.2),
            fuzz: 0.3,
        },
    );

    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, "ground");
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.2), 0.5, "center");
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, "glass");
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.4, "bubble");
    scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, "gold");

    scene
}

/// One grey diffuse sphere resting on a large ground sphere.
pub fn single_sphere() -> SceneDescription {
    let mut scene = SceneDescription::new(CameraConfig::default());

    scene.add_material(
        "grey",
        MaterialDesc::Lambertian {
            albedo: Vec3::splat(0.5),
        },
    );
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, "grey");
    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, "grey");

    scene
}

fn random_color(rng: &mut StdRng, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(min..max),
        rng.gen_range(min..max),
        rng.gen_range(min..max),
    )
}
