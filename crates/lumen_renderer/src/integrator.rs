//! Recursive radiance estimator.
//!
//! Follows one light path depth-first: intersect, scatter, recurse, and
//! multiply the attenuations on the way back up. Paths end when the bounce
//! budget runs out, a material absorbs the ray, or the ray escapes to the sky.

use crate::{Color, Hittable, Ray};
use lumen_math::Interval;
use rand::RngCore;

/// Closest hit distance accepted after a bounce.
///
/// Round-off can place a scattered ray's origin just below the surface it
/// left; ignoring hits this close stops it from re-hitting that surface
/// (shadow acne).
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Horizon-to-zenith blue of the sky gradient.
pub const SKY_BLUE: Color = Color::new(0.5, 0.7, 1.0);

/// Compute the color seen along a ray.
///
/// `depth` is the remaining bounce budget; at zero no more light is gathered.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded the ray bounce limit, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        // Absorbed
        None => Color::ZERO,
    }
}

/// Background seen by rays that escape the scene.
///
/// White at the bottom blending to blue at the top, by the normalized
/// direction's y component.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::ONE + a * SKY_BLUE
}
