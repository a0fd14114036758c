//! Small dense polynomials used to express cross-section and volume functions.

use crate::math::{Real, NEWTON_ITERATIONS};
use crate::num::Zero;
use na::Point;
use std::ops::{Add, AddAssign, Mul};

/// A polynomial of degree `N - 1` with coefficients stored from the highest degree to the
/// constant term.
///
/// `Polynomial::new([a, b, c])` is the quadratic `a·x² + b·x + c`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Polynomial<const N: usize> {
    /// The coefficients, highest degree first.
    pub coeffs: [Real; N],
}

/// A polynomial of degree 1.
pub type Linear = Polynomial<2>;
/// A polynomial of degree 2.
pub type Quadratic = Polynomial<3>;
/// A polynomial of degree 3.
pub type Cubic = Polynomial<4>;

impl<const N: usize> Polynomial<N> {
    /// Creates a polynomial from its coefficients, highest degree first.
    #[inline]
    pub const fn new(coeffs: [Real; N]) -> Self {
        Self { coeffs }
    }

    /// Evaluates this polynomial at `x` with Horner's scheme.
    #[inline]
    pub fn eval(&self, x: Real) -> Real {
        self.coeffs.iter().fold(0.0, |acc, c| acc * x + c)
    }

    /// Replaces the constant term.
    #[inline]
    pub fn set_constant(&mut self, value: Real) {
        if let Some(c) = self.coeffs.last_mut() {
            *c = value;
        }
    }

    /// Searches the `x` in `[xmin, xmax]` such that `self(x) == value`.
    ///
    /// `derivative` must be the derivative of `self`. The search runs a fixed number of Newton
    /// iterations starting at the middle of the interval, keeping every iterate inside of the
    /// interval. A vanishing derivative stops the iterations. Finally, an interval bound replaces
    /// the iterate if its residual is at least as small, so the result never leaves
    /// `[xmin, xmax]`.
    pub fn newton_search<const D: usize>(
        &self,
        derivative: &Polynomial<D>,
        value: Real,
        xmin: Real,
        xmax: Real,
    ) -> Real {
        let residual = |x: Real| self.eval(x) - value;

        let mut x = (xmin + xmax) * 0.5;
        let mut y = residual(x);

        for _ in 0..NEWTON_ITERATIONS {
            let d = derivative.eval(x);

            if d == 0.0 {
                break;
            }

            x = (x - y / d).max(xmin).min(xmax);
            y = residual(x);
        }

        let mut best = (x, y.abs());

        for bound in [xmin, xmax] {
            let r = residual(bound).abs();
            if r <= best.1 {
                best = (bound, r);
            }
        }

        best.0
    }
}

impl<const N: usize> Default for Polynomial<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> Zero for Polynomial<N> {
    #[inline]
    fn zero() -> Self {
        Self { coeffs: [0.0; N] }
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| *c == 0.0)
    }
}

impl<const N: usize> Add for Polynomial<N> {
    type Output = Self;

    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<const N: usize> AddAssign for Polynomial<N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *a += *b;
        }
    }
}

impl<const N: usize> Mul<Real> for Polynomial<N> {
    type Output = Self;

    #[inline]
    fn mul(mut self, rhs: Real) -> Self {
        for c in &mut self.coeffs {
            *c *= rhs;
        }
        self
    }
}

/// Polynomials that can be integrated into a polynomial with `M` coefficients.
pub trait Antiderivative<const M: usize> {
    /// The antiderivative of `self` with a zero constant term.
    fn antiderivative(&self) -> Polynomial<M>;
}

impl Antiderivative<3> for Linear {
    #[inline]
    fn antiderivative(&self) -> Quadratic {
        let [a, b] = self.coeffs;
        Quadratic::new([a * 0.5, b, 0.0])
    }
}

impl Antiderivative<4> for Quadratic {
    #[inline]
    fn antiderivative(&self) -> Cubic {
        let [a, b, c] = self.coeffs;
        Cubic::new([a / 3.0, b * 0.5, c, 0.0])
    }
}

impl Linear {
    /// The linear function equal to `y0` at `x0` and `y1` at `x1`.
    ///
    /// Returns the zero polynomial if `x1 <= x0`.
    pub fn through(x0: Real, y0: Real, x1: Real, y1: Real) -> Self {
        if x1 > x0 {
            let slope = (y1 - y0) / (x1 - x0);
            Linear::new([slope, y0 - slope * x0])
        } else {
            Linear::zero()
        }
    }
}

impl Quadratic {
    /// The quadratic `coeff · (x - root)²`.
    #[inline]
    pub fn scaled_square(root: Real, coeff: Real) -> Self {
        Quadratic::new([coeff, -2.0 * coeff * root, coeff * root * root])
    }

    /// The quadratic passing through `(x0, y0)`, `(x1, y1)` and `(x2, y2)`.
    ///
    /// The abscissae are expected to be sorted. If `x1` coincides with one of the
    /// extremities, the linear function through the extremities is returned instead. If
    /// `x0 == x2`, the zero polynomial is returned.
    pub fn interpolate(x0: Real, y0: Real, x1: Real, y1: Real, x2: Real, y2: Real) -> Self {
        if x1 > x0 && x2 > x1 {
            let l0 = y0 / ((x0 - x1) * (x0 - x2));
            let l1 = y1 / ((x1 - x0) * (x1 - x2));
            let l2 = y2 / ((x2 - x0) * (x2 - x1));

            // Each term is l_i·(x - a)(x - b) = l_i·(x² - (a + b)·x + a·b).
            Quadratic::new([
                l0 + l1 + l2,
                -(l0 * (x1 + x2) + l1 * (x0 + x2) + l2 * (x0 + x1)),
                l0 * x1 * x2 + l1 * x0 * x2 + l2 * x0 * x1,
            ])
        } else {
            let [a, b] = Linear::through(x0, y0, x2, y2).coeffs;
            Quadratic::new([0.0, a, b])
        }
    }
}

/// Interpolates between two points tagged with the scalar levels `t0` and `t1`.
///
/// Returns the point at level `t` on the segment `[x0, x1]`, or `x0` if both levels coincide.
#[inline]
pub fn lerp_by_level<const D: usize>(
    t0: Real,
    x0: &Point<Real, D>,
    t1: Real,
    x1: &Point<Real, D>,
    t: Real,
) -> Point<Real, D> {
    let f = if t1 != t0 { (t - t0) / (t1 - t0) } else { 0.0 };
    x0 + (x1 - x0) * f
}

#[cfg(test)]
mod test {
    use super::*;
    use na::Point3;

    #[test]
    fn horner_eval() {
        let p = Cubic::new([1.0, -2.0, 3.0, -4.0]);
        assert_relative_eq!(p.eval(2.0), 8.0 - 8.0 + 6.0 - 4.0);
        assert_relative_eq!(p.eval(0.0), -4.0);
    }

    #[test]
    fn antiderivative_of_quadratic() {
        let p = Quadratic::new([3.0, 2.0, 1.0]);
        let primitive = p.antiderivative();
        assert_eq!(primitive.coeffs, [1.0, 1.0, 1.0, 0.0]);
        assert_relative_eq!(primitive.eval(1.0) - primitive.eval(0.0), 3.0);
    }

    #[test]
    fn quadratic_interpolation_hits_samples() {
        let q = Quadratic::interpolate(0.0, 1.0, 1.0, 3.0, 3.0, -2.0);
        assert_relative_eq!(q.eval(0.0), 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(q.eval(1.0), 3.0, epsilon = 1.0e-12);
        assert_relative_eq!(q.eval(3.0), -2.0, epsilon = 1.0e-12);
    }

    #[test]
    fn quadratic_interpolation_degenerates_gracefully() {
        let linear = Quadratic::interpolate(0.0, 1.0, 0.0, 7.0, 2.0, 5.0);
        assert_eq!(linear.coeffs[0], 0.0);
        assert_relative_eq!(linear.eval(1.0), 3.0);

        let flat = Quadratic::interpolate(1.0, 1.0, 1.0, 2.0, 1.0, 3.0);
        assert!(flat.is_zero());
    }

    #[test]
    fn newton_search_stays_in_interval() {
        let derivative = Linear::new([2.0, 0.0]);
        let primitive: Quadratic = derivative.antiderivative();

        let x = primitive.newton_search(&derivative, 0.25, 0.0, 1.0);
        assert_relative_eq!(x, 0.5, epsilon = 1.0e-12);

        // Unreachable values are clamped to the closest bound.
        let x = primitive.newton_search(&derivative, 10.0, 0.0, 1.0);
        assert_eq!(x, 1.0);
        let x = primitive.newton_search(&derivative, -3.0, 0.0, 1.0);
        assert_eq!(x, 0.0);
    }

    #[test]
    fn lerp_by_level_handles_equal_levels() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 4.0, 6.0);
        assert_eq!(lerp_by_level(1.0, &a, 3.0, &b, 2.0), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(lerp_by_level(1.0, &a, 1.0, &b, 2.0), a);
    }
}
