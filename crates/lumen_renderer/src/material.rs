//! Surface materials and their scattering models.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
use lumen_core::MaterialDesc;
use lumen_math::{Ray, Vec3, Vec3Ext};
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a successful scatter event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Fraction of light carried along the scattered ray, per channel
    pub attenuation: Color,
    /// The outgoing ray
    pub scattered: Ray,
}

/// Describes how light interacts with a surface.
///
/// Closed set of variants; immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse surface.
    Lambertian { albedo: Color },
    /// Reflective surface. `fuzz` is 0.0 for a perfect mirror, 1.0 for very rough.
    Metal { albedo: Color, fuzz: f32 },
    /// Glass-like surface (1.0 = air, 1.5 = glass, 2.4 = diamond).
    Dielectric { refractive_index: f32 },
}

impl Material {
    /// Create a new Lambertian material with the given albedo color.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a new Metal material; `fuzz` is clamped to `[0, 1]`.
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Create a new Dielectric material.
    pub fn dielectric(refractive_index: f32) -> Self {
        Material::Dielectric { refractive_index }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => {
                let mut scatter_direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if scatter_direction.near_zero() {
                    scatter_direction = rec.normal;
                }

                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, scatter_direction),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let scattered_dir = reflected + fuzz * random_in_unit_sphere(rng);

                // Fuzz pushed the ray below the surface: absorb it
                if scattered_dir.dot(rec.normal) <= 0.0 {
                    return None;
                }

                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, scattered_dir),
                })
            }
            Material::Dielectric { refractive_index } => {
                let refraction_ratio = if rec.front_face {
                    1.0 / refractive_index
                } else {
                    refractive_index
                };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

                let cannot_refract = refraction_ratio * sin_theta >= 1.0;
                let direction = if cannot_refract
                    || reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
                {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, refraction_ratio)
                };

                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction),
                })
            }
        }
    }
}

impl From<MaterialDesc> for Material {
    fn from(desc: MaterialDesc) -> Self {
        match desc {
            MaterialDesc::Lambertian { albedo } => Material::lambertian(albedo),
            MaterialDesc::Metal { albedo, fuzz } => Material::metal(albedo, fuzz),
            MaterialDesc::Dielectric { refractive_index } => Material::dielectric(refractive_index),
        }
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface (Snell's law).
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation for reflectance.
#[inline]
pub fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
    let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record<'a>(ray: &Ray, outward_normal: Vec3, material: &'a Material) -> HitRecord<'a> {
        HitRecord::new(ray, 1.0, outward_normal, material)
    }

    #[test]
    fn test_lambertian_never_fails() {
        let material = Material::lambertian(Color::new(0.8, 0.3, 0.3));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.3, -1.0, 0.1));
        let rec = record(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..1000 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::new(0.8, 0.3, 0.3));
            assert_eq!(result.scattered.origin(), rec.p);
            assert!(!result.scattered.direction().near_zero());
            // normal + unit vector never leaves the normal's hemisphere
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let material = Material::metal(Color::new(0.7, 0.6, 0.5), 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = record(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(6);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-5);
        assert_eq!(result.attenuation, Color::new(0.7, 0.6, 0.5));
    }

    #[test]
    fn test_metal_absorbs_into_surface() {
        let material = Material::metal(Color::ONE, 0.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Y);
        // Normal along the incoming direction: the reflection points into the surface
        let rec = HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::NEG_Y,
            material: &material,
            t: 1.0,
            front_face: true,
        };
        let mut rng = StdRng::seed_from_u64(7);

        assert!(material.scatter(&ray, &rec, &mut rng).is_none());
    }

    #[test]
    fn test_metal_fails_exactly_below_surface() {
        let material = Material::metal(Color::ONE, 1.0);
        // Grazing incidence so the fuzz often pushes rays under the surface
        let ray = Ray::new(Vec3::new(-10.0, 0.1, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let rec = record(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(8);
        let mut absorbed = 0;

        for _ in 0..2000 {
            // Replay the same draw to see the fuzzed direction the material saw
            let mut probe = rng.clone();
            let expected_dir = reflect(ray.direction().normalize(), rec.normal)
                + random_in_unit_sphere(&mut probe);

            match material.scatter(&ray, &rec, &mut rng) {
                Some(result) => {
                    assert!(expected_dir.dot(rec.normal) > 0.0);
                    assert!((result.scattered.direction() - expected_dir).length() < 1e-6);
                }
                None => {
                    assert!(expected_dir.dot(rec.normal) <= 0.0);
                    absorbed += 1;
                }
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        assert_eq!(
            Material::metal(Color::ONE, 3.0),
            Material::Metal { albedo: Color::ONE, fuzz: 1.0 }
        );
        assert_eq!(
            Material::metal(Color::ONE, -1.0),
            Material::Metal { albedo: Color::ONE, fuzz: 0.0 }
        );
    }

    #[test]
    fn test_dielectric_never_fails() {
        let material = Material::dielectric(1.5);
        let mut rng = StdRng::seed_from_u64(9);

        for (outward, dir) in [
            (Vec3::Y, Vec3::new(0.2, -1.0, 0.0)),
            (Vec3::Y, Vec3::new(1.0, -0.05, 0.0)),
            (Vec3::NEG_Y, Vec3::new(0.9, -0.2, 0.0)),
        ] {
            let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), dir);
            let rec = record(&ray, outward, &material);
            for _ in 0..200 {
                let result = material.scatter(&ray, &rec, &mut rng).unwrap();
                assert_eq!(result.attenuation, Color::ONE);
                assert!((result.scattered.direction().length() - 1.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Material::dielectric(1.5);
        // Leaving glass at a shallow angle: sin(theta) * 1.5 > 1
        let direction = Vec3::new(0.9, 0.2, 0.0).normalize();
        let ray = Ray::new(Vec3::ZERO, direction);
        let rec = record(&ray, Vec3::Y, &material);
        assert!(!rec.front_face);

        let expected = reflect(direction, rec.normal);
        let mut rng = StdRng::seed_from_u64(10);
        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert!((result.scattered.direction() - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_dielectric_head_on_mostly_refracts() {
        let material = Material::dielectric(1.5);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let rec = record(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(12);

        let refracted = (0..1000)
            .filter(|_| {
                let result = material.scatter(&ray, &rec, &mut rng).unwrap();
                result.scattered.direction().y < 0.0
            })
            .count();

        // Normal incidence reflects about 4% of the time
        assert!(refracted > 900, "refracted {} of 1000", refracted);
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_straight_through() {
        let out = refract(Vec3::NEG_Y, Vec3::Y, 1.0 / 1.5);
        assert!((out - Vec3::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn test_reflectance() {
        // Normal incidence on glass: ((1 - 1.5) / (1 + 1.5))^2 = 0.04
        assert!((reflectance(1.0, 1.5) - 0.04).abs() < 1e-6);
        // Grazing incidence reflects everything
        assert!((reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_description() {
        let metal = Material::from(MaterialDesc::Metal {
            albedo: Color::splat(0.9),
            fuzz: 2.0,
        });
        assert_eq!(metal, Material::metal(Color::splat(0.9), 1.0));

        let glass = Material::from(MaterialDesc::Dielectric { refractive_index: 1.5 });
        assert_eq!(glass, Material::dielectric(1.5));
    }
}
