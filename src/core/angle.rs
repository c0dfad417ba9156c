//! Heading angle as wrapped integer degrees.
//!
//! Raw sensor and odometry headings arrive as integer degrees and every
//! correction the core applies is snapped to a cardinal direction, so the
//! heading type is an integer with exact wraparound rather than a float.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Lowest representable heading in degrees.
const LOWER_BOUND: i32 = -179;

/// A heading in integer degrees, always normalized to [-179, 180].
///
/// The convention is 0° = +X (right), 90° = +Y (up), 180° = -X (left),
/// -90° = -Y (down), counter-clockwise positive.
///
/// Every constructor and arithmetic operation re-normalizes, so a stored
/// `Angle` is always in range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Angle(i16);

impl Angle {
    /// Create a new angle, normalizing into [-179, 180].
    #[inline]
    pub fn new(degrees: i16) -> Self {
        Self(Self::normalize(degrees as i32))
    }

    /// Heading in degrees, in [-179, 180].
    #[inline]
    pub fn degrees(self) -> i16 {
        self.0
    }

    /// Normalize an arbitrary degree value into [-179, 180].
    ///
    /// Shifts into [0, 360) relative to the lower bound, wraps, and shifts
    /// back. Exact for the boundary values: -179 → -179, 0 → 0, 180 → 180,
    /// 359 → -1, 360 → 0, -360 → 0.
    #[inline]
    fn normalize(degrees: i32) -> i16 {
        let mut shifted = (degrees - LOWER_BOUND) % 360;
        if shifted < 0 {
            shifted += 360;
        }
        (shifted + LOWER_BOUND) as i16
    }

    /// Wrapping addition.
    #[inline]
    pub fn add_degrees(self, degrees: i16) -> Self {
        Self(Self::normalize(self.0 as i32 + degrees as i32))
    }

    /// Heading in [0, 360).
    #[inline]
    pub fn to_360(self) -> u16 {
        if self.0 < 0 {
            (self.0 + 360) as u16
        } else {
            self.0 as u16
        }
    }

    /// Heading in radians.
    #[inline]
    pub fn to_radians(self) -> f32 {
        (self.0 as f32).to_radians()
    }

    /// Index of the sector this heading falls in when the circle is split
    /// into `segments` equal sectors starting at 0°.
    #[inline]
    pub fn segment_index(self, segments: u16) -> u16 {
        (self.to_360() as u32 * segments as u32 / 360) as u16
    }

    /// True if the heading is within `tolerance` degrees of a multiple of 90°.
    #[inline]
    pub fn is_orthogonal(self, tolerance: i16) -> bool {
        let rem = (self.to_360() % 90) as i16;
        rem <= tolerance || rem >= 90 - tolerance
    }

    /// The cardinal direction (multiple of 90°) closest to this heading.
    #[inline]
    pub fn closest_right_angle(self) -> Angle {
        let rounded = (self.to_360() + 45) / 90 * 90;
        Angle::new((rounded % 360) as i16)
    }

    /// Within `tolerance` of 0° (+X).
    #[inline]
    pub fn is_pointing_right(self, tolerance: i16) -> bool {
        self.is_orthogonal(tolerance) && self.closest_right_angle().0 == 0
    }

    /// Within `tolerance` of 90° (+Y).
    #[inline]
    pub fn is_pointing_up(self, tolerance: i16) -> bool {
        self.is_orthogonal(tolerance) && self.closest_right_angle().0 == 90
    }

    /// Within `tolerance` of 180° (-X).
    #[inline]
    pub fn is_pointing_left(self, tolerance: i16) -> bool {
        self.is_orthogonal(tolerance) && self.closest_right_angle().0 == 180
    }

    /// Within `tolerance` of -90° (-Y).
    #[inline]
    pub fn is_pointing_down(self, tolerance: i16) -> bool {
        self.is_orthogonal(tolerance) && self.closest_right_angle().0 == -90
    }
}

impl Add for Angle {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self(Self::normalize(self.0 as i32 + other.0 as i32))
    }
}

impl Sub for Angle {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self(Self::normalize(self.0 as i32 - other.0 as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_boundaries() {
        assert_eq!(Angle::new(-179).degrees(), -179);
        assert_eq!(Angle::new(0).degrees(), 0);
        assert_eq!(Angle::new(180).degrees(), 180);
        assert_eq!(Angle::new(359).degrees(), -1);
        assert_eq!(Angle::new(360).degrees(), 0);
        assert_eq!(Angle::new(-360).degrees(), 0);
        assert_eq!(Angle::new(-180).degrees(), 180);
        assert_eq!(Angle::new(181).degrees(), -179);
    }

    #[test]
    fn test_normalize_idempotent() {
        for v in -720..=720 {
            let once = Angle::new(v);
            let twice = Angle::new(once.degrees());
            assert_eq!(once, twice);
            assert!(once.degrees() >= -179 && once.degrees() <= 180);
        }
    }

    #[test]
    fn test_to_360_round_trip() {
        for v in -179..=180i16 {
            let a = Angle::new(v);
            let deg360 = a.to_360();
            assert!(deg360 < 360);
            assert_eq!(Angle::new(deg360 as i16), a);
        }
    }

    #[test]
    fn test_wrapping_arithmetic() {
        assert_eq!((Angle::new(170) + Angle::new(20)).degrees(), -170);
        assert_eq!((Angle::new(-170) - Angle::new(20)).degrees(), 170);
        assert_eq!(Angle::new(90).add_degrees(-180).degrees(), -90);
    }

    #[test]
    fn test_segment_index() {
        assert_eq!(Angle::new(0).segment_index(4), 0);
        assert_eq!(Angle::new(90).segment_index(4), 1);
        assert_eq!(Angle::new(-90).segment_index(4), 3);
        assert_eq!(Angle::new(44).segment_index(8), 0);
        assert_eq!(Angle::new(45).segment_index(8), 1);
    }

    #[test]
    fn test_orthogonality() {
        assert!(Angle::new(0).is_orthogonal(0));
        assert!(Angle::new(90).is_orthogonal(0));
        assert!(Angle::new(180).is_orthogonal(0));
        assert!(Angle::new(-90).is_orthogonal(0));
        assert!(!Angle::new(1).is_orthogonal(0));
        assert!(Angle::new(87).is_orthogonal(5));
        assert!(Angle::new(93).is_orthogonal(5));
        assert!(!Angle::new(84).is_orthogonal(5));
    }

    #[test]
    fn test_closest_right_angle() {
        assert_eq!(Angle::new(10).closest_right_angle().degrees(), 0);
        assert_eq!(Angle::new(50).closest_right_angle().degrees(), 90);
        assert_eq!(Angle::new(134).closest_right_angle().degrees(), 90);
        assert_eq!(Angle::new(135).closest_right_angle().degrees(), 180);
        assert_eq!(Angle::new(-100).closest_right_angle().degrees(), -90);
        assert_eq!(Angle::new(-1).closest_right_angle().degrees(), 0);
    }

    #[test]
    fn test_direction_predicates() {
        assert!(Angle::new(0).is_pointing_right(0));
        assert!(Angle::new(92).is_pointing_up(2));
        assert!(Angle::new(180).is_pointing_left(0));
        assert!(Angle::new(-88).is_pointing_down(2));
        assert!(!Angle::new(92).is_pointing_up(0));
        assert!(!Angle::new(0).is_pointing_left(0));
    }
}
