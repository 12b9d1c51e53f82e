//! Planar points used both as triangulation vertices and as search-graph
//! node identities.
//!
//! Identity is exact coordinate equality: two points computed along
//! different arithmetic paths compare unequal even when they differ only in
//! the last ulp. The one normalisation applied is `-0.0 == +0.0`, which keeps
//! `Hash` and `Ord` consistent with `PartialEq`.
//!
//! Coordinates must be finite. `Eq` is implemented on that assumption; parsers
//! reject NaN and infinities before a `Point` is ever built from input.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::numeric::Real;

#[derive(Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

#[inline]
fn canonical(v: Real) -> Real {
    // folds -0.0 into +0.0
    if v == 0.0 { 0.0 } else { v }
}

impl Point {
    pub const fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    /// Midpoint of the segment `self`-`other`.
    ///
    /// Computed as `(a + b) / 2` per axis, which is symmetric in its
    /// arguments, so both orientations of a triangle edge map to the same key.
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    #[inline]
    pub fn distance(self, other: Point) -> Real {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[inline]
    pub fn manhattan(self, other: Point) -> Real {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Point at parameter `t` along `self`-`other` (`t = 0` is `self`).
    ///
    /// Computed as `self * (1 - t) + other * t`, so `t = 0.5` equals
    /// [`Point::midpoint`] bit for bit.
    #[inline]
    pub fn lerp(self, other: Point, t: Real) -> Point {
        let s = 1.0 - t;
        Point::new(self.x * s + other.x * t, self.y * s + other.y * t)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical(self.x).to_bits().hash(state);
        canonical(self.y).to_bits().hash(state);
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        canonical(self.x)
            .total_cmp(&canonical(other.x))
            .then_with(|| canonical(self.y).total_cmp(&canonical(other.y)))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(Real, Real)> for Point {
    fn from((x, y): (Real, Real)) -> Self {
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn midpoint_is_symmetric() {
        let a = Point::new(0.1, 7.3);
        let b = Point::new(35.0, 2.2);
        assert_eq!(a.midpoint(b), b.midpoint(a));
        let origin = Point::new(0.0, 0.0);
        assert_eq!(origin.midpoint(Point::new(2.0, 4.0)), Point::new(1.0, 2.0));
    }

    #[test]
    fn negative_zero_matches_zero() {
        let a = Point::new(-0.0, 1.0);
        let b = Point::new(0.0, 1.0);
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);

        let set: HashSet<Point> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn equality_is_exact() {
        let a = Point::new(0.1 + 0.2, 0.0);
        let b = Point::new(0.3, 0.0);
        assert_ne!(a, b);
    }

    #[test]
    fn ordering_is_x_then_y() {
        let mut pts = vec![
            Point::new(1.0, 0.0),
            Point::new(0.0, 5.0),
            Point::new(0.0, -1.0),
        ];
        pts.sort();
        assert_eq!(
            pts,
            vec![
                Point::new(0.0, -1.0),
                Point::new(0.0, 5.0),
                Point::new(1.0, 0.0)
            ]
        );
    }

    #[test]
    fn distances() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.manhattan(b), 7.0);
        assert_eq!(a.lerp(b, 0.5), Point::new(1.5, 2.0));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn half_way_lerp_is_the_midpoint() {
        let a = Point::new(0.1, 7.3);
        let b = Point::new(2.9, -0.7);
        assert_eq!(a.lerp(b, 0.5), a.midpoint(b));
    }
}
