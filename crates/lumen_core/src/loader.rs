//! Scene file loading.
//!
//! Scenes are JSON documents matching [`SceneDescription`]. Loading always
//! validates, so a scene returned from here resolves without errors.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDescription;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Sphere {index} is invalid: {reason}")]
    InvalidSphere { index: usize, reason: String },

    #[error("Material '{name}' is invalid: {reason}")]
    InvalidMaterial { name: String, reason: String },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Load and validate a scene from a JSON file.
///
/// # Example
///
/// ```ignore
/// use lumen_core::load_scene;
///
/// let scene = load_scene("scenes/glass.json")?;
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let scene = scene_from_str(&json)?;

    log::info!(
        "Loaded scene {} ({} spheres, {} materials)",
        path.display(),
        scene.sphere_count(),
        scene.material_count()
    );

    Ok(scene)
}

/// Parse and validate a scene from a JSON string.
pub fn scene_from_str(json: &str) -> SceneResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(json)?;
    scene.validate()?;

    if scene.spheres.is_empty() {
        log::warn!("Scene has no spheres; every pixel will show the sky");
    }

    Ok(scene)
}
