//! Camera for ray generation.

use crate::sampling::random_in_unit_disk;
use lumen_core::CameraConfig;
use lumen_math::{Ray, Vec3};
use rand::RngCore;

/// A thin-lens camera.
///
/// Built once from a [`CameraConfig`]; generating rays never mutates it,
/// so one camera is shared by every render band.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    // Orthonormal basis; w points away from the view direction
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a camera for an image with the given aspect ratio (width / height).
    pub fn new(config: &CameraConfig, aspect_ratio: f32) -> Self {
        let theta = config.vfov.to_radians();
        let half_height = config.focus_distance * (theta / 2.0).tan();
        let viewport_height = 2.0 * half_height;
        let viewport_width = aspect_ratio * viewport_height;

        let w = (config.look_from - config.look_at).normalize();
        let u = config.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = config.look_from;
        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - config.focus_distance * w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: config.aperture / 2.0,
        }
    }

    /// Generate a ray through the image-plane point `(s, t)`.
    ///
    /// `s` runs left to right and `t` bottom to top, both in `[0, 1]`.
    /// With a non-zero aperture the origin is jittered across the lens.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            rd.x * self.u + rd.y * self.v
        } else {
            Vec3::ZERO
        };

        let ray_origin = self.origin + offset;
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;

        Ray::new(ray_origin, target - ray_origin)
    }
}
