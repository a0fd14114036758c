//! Definition of the tetrahedron shape.

use crate::math::{Point, Real};

/// A tetrahedron with 4 vertices.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tetrahedron {
    /// The tetrahedron first point.
    pub a: Point<Real>,
    /// The tetrahedron second point.
    pub b: Point<Real>,
    /// The tetrahedron third point.
    pub c: Point<Real>,
    /// The tetrahedron fourth point.
    pub d: Point<Real>,
}

impl Tetrahedron {
    /// Creates a tetrahedron from four points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>, d: Point<Real>) -> Tetrahedron {
        Tetrahedron { a, b, c, d }
    }

    /// Creates a tetrahedron from four indices into a point buffer.
    #[inline]
    pub fn from_indices(points: &[Point<Real>], idx: &[u32; 4]) -> Tetrahedron {
        Tetrahedron::new(
            points[idx[0] as usize],
            points[idx[1] as usize],
            points[idx[2] as usize],
            points[idx[3] as usize],
        )
    }

    /// Computes the volume of this tetrahedron.
    #[inline]
    pub fn volume(&self) -> Real {
        self.signed_volume().abs()
    }

    /// Computes the signed volume of this tetrahedron.
    ///
    /// If it is positive, `d` is on the half-space pointed by the normal of the oriented triangle
    /// `(a, b, c)`.
    #[inline]
    pub fn signed_volume(&self) -> Real {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let ad = self.d - self.a;

        ab.cross(&ac).dot(&ad) / 6.0
    }
}

#[cfg(test)]
mod test {
    use super::Tetrahedron;
    use crate::math::Point;

    #[test]
    fn unit_tetrahedron_volume() {
        let tetra = Tetrahedron::new(
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        );
        assert_relative_eq!(tetra.signed_volume(), 1.0 / 6.0, epsilon = 1.0e-12);

        let flipped = Tetrahedron::new(tetra.b, tetra.a, tetra.c, tetra.d);
        assert_relative_eq!(flipped.signed_volume(), -1.0 / 6.0, epsilon = 1.0e-12);
        assert_relative_eq!(flipped.volume(), 1.0 / 6.0, epsilon = 1.0e-12);
    }
}
