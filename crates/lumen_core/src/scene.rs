//! Scene description types for Lumen.
//!
//! A scene is configuration data: named materials, spheres that reference
//! them by name, a camera and optional render settings. The renderer
//! resolves the names once and never looks at this representation again.

use std::collections::BTreeMap;

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::loader::{SceneError, SceneResult};
use crate::settings::{CameraConfig, RenderSettings};

/// A surface material as written in a scene file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    /// Diffuse surface
    Lambertian { albedo: Vec3 },
    /// Reflective surface; `fuzz` 0 is a perfect mirror
    Metal {
        albedo: Vec3,
        #[serde(default)]
        fuzz: f32,
    },
    /// Refractive surface such as glass (1.5) or water (1.33)
    Dielectric { refractive_index: f32 },
}

impl MaterialDesc {
    fn validate(&self, name: &str) -> SceneResult<()> {
        let invalid = |reason: &str| SceneError::InvalidMaterial {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        match *self {
            MaterialDesc::Lambertian { albedo } => {
                if !albedo.is_finite() {
                    return Err(invalid("albedo must be finite"));
                }
            }
            MaterialDesc::Metal { albedo, fuzz } => {
                if !albedo.is_finite() || !fuzz.is_finite() {
                    return Err(invalid("albedo and fuzz must be finite"));
                }
            }
            MaterialDesc::Dielectric { refractive_index } => {
                if !(refractive_index.is_finite() && refractive_index > 0.0) {
                    return Err(invalid("refractive index must be positive"));
                }
            }
        }
        Ok(())
    }
}

/// A sphere referencing a material by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f32,
    pub material: String,
}

/// A sphere with its material looked up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: MaterialDesc,
}

/// A complete scene: camera, materials and spheres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Camera placement and lens
    #[serde(default)]
    pub camera: CameraConfig,

    /// Render settings stored alongside the scene (CLI flags override them)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<RenderSettings>,

    /// Materials keyed by name
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,

    /// Spheres in scene order
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
}

impl SceneDescription {
    /// Create an empty scene seen through the given camera.
    pub fn new(camera: CameraConfig) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    /// Register a material under `name`, replacing any previous definition.
    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDesc) {
        self.materials.insert(name.into(), material);
    }

    /// Add a sphere that uses the material called `material`.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: impl Into<String>) {
        self.spheres.push(SphereDesc {
            center,
            radius,
            material: material.into(),
        });
    }

    /// Get a material by name.
    pub fn material(&self, name: &str) -> Option<&MaterialDesc> {
        self.materials.get(name)
    }

    /// Get sphere count.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Get material count.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Check every material and sphere without building anything.
    pub fn validate(&self) -> SceneResult<()> {
        self.resolve().map(|_| ())
    }

    /// Resolve material names and validate geometry.
    ///
    /// Spheres come back in scene order.
    pub fn resolve(&self) -> SceneResult<Vec<ResolvedSphere>> {
        for (name, material) in &self.materials {
            material.validate(name)?;
        }

        self.spheres
            .iter()
            .enumerate()
            .map(|(index, sphere)| {
                if !sphere.center.is_finite() {
                    return Err(SceneError::InvalidSphere {
                        index,
                        reason: "center must be finite".to_string(),
                    });
                }
                if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                    return Err(SceneError::InvalidSphere {
                        index,
                        reason: format!("radius {} is not a positive number", sphere.radius),
                    });
                }

                let material = self.material(&sphere.material).copied().ok_or_else(|| {
                    SceneError::UnknownMaterial {
                        index,
                        name: sphere.material.clone(),
                    }
                })?;

                Ok(ResolvedSphere {
                    center: sphere.center,
                    radius: sphere.radius,
                    material,
                })
            })
            .collect()
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
