//! Lumen Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres with diffuse, metal and glass
//! materials. Rows of the image are split into bands and traced in parallel;
//! each band owns its own seeded random stream, so a render is reproducible
//! for a given seed and worker count.

mod band;
mod camera;
mod hittable;
mod integrator;
mod material;
mod output;
mod renderer;
mod sampling;
mod sphere;

pub use band::{band_rng, partition_rows, render_band, BandResult, RowBand};
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, Object, Scene};
pub use integrator::{ray_color, sky_gradient, SHADOW_ACNE_EPSILON};
pub use material::{reflect, reflectance, refract, Color, Material, ScatterResult};
pub use output::{save, write_ppm, OutputError};
pub use renderer::{
    color_to_rgb, linear_to_gamma, render, render_pixel, render_serial, validate_settings,
    worker_count, ImageBuffer, RenderError, RenderResult,
};
pub use sampling::{gen_f32, random_in_unit_disk, random_in_unit_sphere, random_unit_vector};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3};
