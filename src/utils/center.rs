use crate::math::{Point, Real};

/// Computes the geometric center (centroid) of a set of points.
///
/// All points are weighted equally. Returns the origin if `pts` is empty.
///
/// # Example
///
/// ```
/// use youngs::math::Point;
/// use youngs::utils::center;
///
/// let points = [
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(2.0, 0.0, 0.0),
///     Point::new(2.0, 2.0, 0.0),
///     Point::new(0.0, 2.0, 0.0),
/// ];
///
/// let c = center(&points);
/// assert!((c.x - 1.0).abs() < 1.0e-12);
/// assert!((c.y - 1.0).abs() < 1.0e-12);
/// ```
#[inline]
pub fn center(pts: &[Point<Real>]) -> Point<Real> {
    if pts.is_empty() {
        return Point::origin();
    }

    let denom = 1.0 / pts.len() as Real;
    pts.iter()
        .fold(Point::origin(), |acc, pt| acc + pt.coords * denom)
}
