//! Lumen Core - Scene descriptions and render settings.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `MaterialDesc`, `SphereDesc`
//! - **Settings**: `RenderSettings`, `CameraConfig`
//! - **Loading**: JSON scene files with validation
//! - **Built-in scenes**: the random sphere field and small test scenes
//!
//! Nothing here knows how to render; `lumen_renderer` turns a description
//! into something it can trace.
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{builtin, load_scene};
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} spheres, {} materials",
//!     scene.sphere_count(),
//!     scene.material_count());
//!
//! let field = builtin::random_spheres(42);
//! ```

pub mod builtin;
pub mod loader;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use loader::{load_scene, scene_from_str, SceneError, SceneResult};
pub use scene::{MaterialDesc, ResolvedSphere, SceneDescription, SphereDesc};
pub use settings::{CameraConfig, RenderSettings};
