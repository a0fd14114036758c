//! Definition of the triangle shape.

use crate::math::{Point, Real};

/// A triangle shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The area of this triangle.
    ///
    /// Computed from the squared edge lengths `a`, `b`, `c` as
    /// `0.25 * sqrt(|4ac - (a - b + c)²|)`, which remains accurate for needle-like triangles.
    #[inline]
    pub fn area(&self) -> Real {
        let a = (self.b - self.a).norm_squared();
        let b = (self.c - self.b).norm_squared();
        let c = (self.a - self.c).norm_squared();
        let s = a - b + c;

        0.25 * (4.0 * a * c - s * s).abs().sqrt()
    }
}
