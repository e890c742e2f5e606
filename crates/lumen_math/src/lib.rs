// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod ray;
mod vec;

pub use interval::Interval;
pub use ray::Ray;
pub use vec::{Vec3Ext, NEAR_ZERO_EPSILON};
