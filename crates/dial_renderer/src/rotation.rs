/// Per-degree rotation table for the hands.
///
/// Hands rotate every frame, but only ever by a whole number of degrees, so
/// the 360 possible model matrices are computed once per graphics context
/// and looked up by [`AngleIndex`].  No allocation or trigonometry happens
/// on the frame path.
use std::fmt;

use glam::Mat4;

/// Number of entries in the table.
pub const DEGREES: usize = 360;

/// A whole-degree angle in `[0, 359]`, always valid for
/// [`RotationCache::get`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AngleIndex(u16);

impl AngleIndex {
    pub const ZERO: Self = Self(0);

    /// An index that is in range by construction.  Anything else is a
    /// logic error and panics.
    #[inline]
    pub fn new(degrees: u32) -> Self {
        assert!(degrees < DEGREES as u32, "angle index {degrees} out of range");
        Self(degrees as u16)
    }

    /// Reduces `degrees` modulo 360.
    #[inline]
    pub const fn wrapping(degrees: u32) -> Self {
        Self((degrees % DEGREES as u32) as u16)
    }

    #[inline]
    pub const fn degrees(self) -> u16 {
        self.0
    }
}

impl fmt::Display for AngleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// 360 rigid rotations about the face normal (+Z); entry `i` rotates by
/// `i` degrees counter-clockwise, entry 0 is the identity.
pub struct RotationCache {
    matrices: Box<[Mat4]>,
}

impl RotationCache {
    /// Fills the table.  Purely numeric; cannot fail.
    pub fn build() -> Self {
        let matrices: Box<[Mat4]> = (0..DEGREES)
            .map(|deg| Mat4::from_rotation_z((deg as f32).to_radians()))
            .collect();
        log::debug!("rotation cache built ({} entries)", matrices.len());
        Self { matrices }
    }

    #[inline]
    pub fn get(&self, index: AngleIndex) -> &Mat4 {
        &self.matrices[index.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn every_entry_rotates_x_axis_onto_unit_circle() {
        let cache = RotationCache::build();
        assert_eq!(cache.len(), DEGREES);
        for d in 0..DEGREES as u32 {
            let p = cache.get(AngleIndex::wrapping(d)).transform_point3(Vec3::X);
            let (s, c) = (d as f32).to_radians().sin_cos();
            assert!(
                (p - Vec3::new(c, s, 0.0)).length() < 1e-5,
                "entry {d} mapped X to {p}"
            );
        }
    }

    #[test]
    fn entry_zero_is_identity() {
        let cache = RotationCache::build();
        assert!(cache.get(AngleIndex::ZERO).abs_diff_eq(Mat4::IDENTITY, 1e-7));
    }

    #[test]
    fn entries_are_rigid() {
        let cache = RotationCache::build();
        for d in [1, 45, 179, 359] {
            let m = cache.get(AngleIndex::wrapping(d));
            assert!((m.determinant() - 1.0).abs() < 1e-5);
            assert!((m.transform_point3(Vec3::Z) - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn index_wraps() {
        assert_eq!(AngleIndex::wrapping(360), AngleIndex::ZERO);
        assert_eq!(AngleIndex::wrapping(725).degrees(), 5);
    }

    #[test]
    fn in_range_index_is_kept() {
        assert_eq!(AngleIndex::new(0), AngleIndex::ZERO);
        assert_eq!(AngleIndex::new(359).degrees(), 359);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_index_is_not_wrapped() {
        let _ = AngleIndex::new(360);
    }
}
