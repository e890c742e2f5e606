use crate::Vec3;

/// Per-component threshold below which a vector counts as degenerate.
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Vector helpers that glam does not provide.
pub trait Vec3Ext {
    /// Returns true if every component is within [`NEAR_ZERO_EPSILON`] of zero.
    ///
    /// Used to catch scatter directions that would produce a zero-length ray.
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.abs().cmplt(Vec3::splat(NEAR_ZERO_EPSILON)).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_zero() {
        assert!(Vec3::ZERO.near_zero());
        assert!(Vec3::new(1e-9, -1e-9, 0.0).near_zero());

        // A single large component is enough to disqualify
        assert!(!Vec3::new(1e-9, 1e-3, 0.0).near_zero());
        assert!(!Vec3::new(0.0, 0.0, -1.0).near_zero());
    }
}
