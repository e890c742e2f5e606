//! Hittable trait, HitRecord and the scene container.

use crate::{Material, Sphere};
use lumen_core::{SceneDescription, SceneResult};
use lumen_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Produced fresh by every successful hit test and never stored.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (unit length, always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the geometric (outward) normal.
    ///
    /// The stored normal is flipped when needed so it always opposes the
    /// ray; `front_face` remembers which side was struck.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        // If the ray and normal point in the same direction, we're inside
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p: ray.at(t),
            normal,
            material,
            t,
            front_face,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object with `t` strictly inside `ray_t`.
    ///
    /// Returns the nearest such intersection.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// Closed set of primitives a scene can hold.
///
/// Dispatch is a `match`, so the hot loop in [`Scene::hit`] stays free of
/// virtual calls.
#[derive(Debug, Clone)]
pub enum Object {
    Sphere(Sphere),
}

impl Hittable for Object {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Object::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Object {
    fn from(sphere: Sphere) -> Self {
        Object::Sphere(sphere)
    }
}

/// An ordered collection of objects.
///
/// Order never changes which hit wins, only how fast it is found.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Object>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from a validated description.
    pub fn from_description(desc: &SceneDescription) -> SceneResult<Self> {
        let scene: Scene = desc
            .resolve()?
            .into_iter()
            .map(|sphere| {
                Sphere::new(sphere.center, sphere.radius, Material::from(sphere.material))
            })
            .collect();

        log::debug!("Built scene with {} objects", scene.len());
        Ok(scene)
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            // Only accept hits nearer than the best one so far
            let interval = ray_t.with_max(closest.map_or(ray_t.max, |rec| rec.t));
            if let Some(rec) = object.hit(ray, interval) {
                closest = Some(rec);
            }
        }

        closest
    }
}

impl FromIterator<Sphere> for Scene {
    fn from_iter<I: IntoIterator<Item = Sphere>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().map(Object::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::builtin;

    fn grey() -> Material {
        Material::lambertian(Vec3::splat(0.5))
    }

    #[test]
    fn test_hit_record_flips_normal() {
        let material = grey();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        // Outward normal facing the ray: front face
        let rec = HitRecord::new(&ray, 1.0, Vec3::Z, &material);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.p, Vec3::new(0.0, 0.0, -1.0));

        // Outward normal along the ray: back face, normal flipped
        let rec = HitRecord::new(&ray, 1.0, Vec3::NEG_Z, &material);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_scene_keeps_nearest_hit() {
        let far = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 0.5, Material::dielectric(1.5));
        let near = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, grey());

        // Insertion order must not matter
        for scene in [
            Scene::from_iter([far.clone(), near.clone()]),
            Scene::from_iter([near.clone(), far.clone()]),
        ] {
            let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
            let rec = scene.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

            assert!((rec.t - 1.5).abs() < 1e-5);
            assert_eq!(*rec.material, grey());
        }
    }

    #[test]
    fn test_scene_respects_interval() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, grey()));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(scene.hit(&ray, Interval::new(0.001, 1.0)).is_none());
        assert!(scene.hit(&ray, Interval::new(0.001, 2.0)).is_some());
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);

        assert!(scene.is_empty());
        assert!(scene.hit(&ray, Interval::new(f32::NEG_INFINITY, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_scene_from_description() {
        let desc = builtin::three_spheres();
        let scene = Scene::from_description(&desc).unwrap();

        assert_eq!(scene.len(), desc.sphere_count());

        // Towards the glass sphere at (-1, 0, -1): the outer shell is struck first
        let ray = Ray::new(Vec3::ZERO, Vec3::new(-1.0, 0.0, -1.0));
        let rec = scene
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .unwrap();
        assert_eq!(*rec.material, Material::dielectric(1.5));
        assert!(rec.front_face);
        assert!(((rec.p - Vec3::new(-1.0, 0.0, -1.0)).length() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_scene_from_invalid_description() {
        let mut desc = SceneDescription::default();
        desc.add_sphere(Vec3::ZERO, 1.0, "missing");

        assert!(Scene::from_description(&desc).is_err());
    }
}
