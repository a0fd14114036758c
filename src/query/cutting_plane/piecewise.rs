use crate::math::Real;
use crate::num::Zero;
use crate::utils::{Antiderivative, Polynomial};
use ordered_float::OrderedFloat;
use std::ops::Range;

/// The distinct levels of a set of vertices along a sweep direction.
#[derive(Clone, Debug)]
pub(crate) struct SweepLevels {
    /// The distinct levels, in increasing order.
    pub levels: Vec<Real>,
    /// For each vertex, the index of its level in `levels`.
    pub rank: Vec<usize>,
}

impl SweepLevels {
    pub fn new(heights: &[Real]) -> Self {
        let mut order: Vec<usize> = (0..heights.len()).collect();
        order.sort_by_key(|i| OrderedFloat(heights[*i]));

        let mut levels: Vec<Real> = Vec::with_capacity(heights.len());
        let mut rank = vec![0; heights.len()];

        for i in order {
            if levels.last() != Some(&heights[i]) {
                levels.push(heights[i]);
            }
            rank[i] = levels.len() - 1;
        }

        Self { levels, rank }
    }

    /// Sorts the vertices of a simplex by increasing level.
    pub fn sort_simplex<const K: usize>(&self, simplex: &[u32; K]) -> [u32; K] {
        let mut sorted = *simplex;
        sorted.sort_by_key(|v| self.rank[*v as usize]);
        sorted
    }

    /// The range of intervals between the levels of the vertices `a` and `b`.
    pub fn intervals(&self, a: u32, b: u32) -> Range<usize> {
        self.rank[a as usize]..self.rank[b as usize]
    }
}

/// A piecewise polynomial defined on consecutive intervals between sorted breakpoints.
///
/// The pieces are derivatives: the cross-section length or area of a region as a function
/// of the sweep plane position. Integrating them yields the swept area or volume.
#[derive(Clone, Debug)]
pub struct PiecewisePolynomial<const N: usize> {
    breaks: Vec<Real>,
    pieces: Vec<Polynomial<N>>,
}

impl<const N: usize> PiecewisePolynomial<N> {
    /// Creates a function equal to zero on every interval between the given sorted breakpoints.
    pub fn new(breaks: Vec<Real>) -> Self {
        let pieces = vec![Polynomial::zero(); breaks.len().saturating_sub(1)];
        Self { breaks, pieces }
    }

    /// Adds `piece` to every interval of the given range.
    pub fn add_on(&mut self, intervals: Range<usize>, piece: Polynomial<N>) {
        for p in &mut self.pieces[intervals] {
            *p += piece;
        }
    }

    /// The antiderivative of the `i`-th piece, null at its left breakpoint, and its value at
    /// its right breakpoint.
    fn integrated_piece<const M: usize>(&self, i: usize) -> (Polynomial<M>, Real)
    where
        Polynomial<N>: Antiderivative<M>,
    {
        let mut primitive = self.pieces[i].antiderivative();
        primitive.set_constant(-primitive.eval(self.breaks[i]));
        let increment = primitive.eval(self.breaks[i + 1]);
        (primitive, increment)
    }

    /// The integral of this function over all of its intervals.
    pub fn integral<const M: usize>(&self) -> Real
    where
        Polynomial<N>: Antiderivative<M>,
    {
        (0..self.pieces.len())
            .map(|i| self.integrated_piece::<M>(i).1)
            .sum()
    }

    /// Finds the position `x` such that the integral of this function over
    /// `[breaks[0], x]` equals `fraction` times its total integral.
    ///
    /// A null total integral, or a non-positive fraction, yields the first breakpoint. A
    /// fraction greater than or equal to 1 yields the last breakpoint.
    pub fn solve<const M: usize>(&self, fraction: Real) -> Real
    where
        Polynomial<N>: Antiderivative<M>,
    {
        let (first, last) = match (self.breaks.first(), self.breaks.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return 0.0,
        };

        let total = self.integral::<M>();
        let target = total * fraction;

        if !(total > 0.0) || !(target > 0.0) {
            return first;
        }

        if target >= total {
            return last;
        }

        let mut remaining = target;
        let last_piece = self.pieces.len() - 1;

        for (i, piece) in self.pieces.iter().enumerate() {
            let (primitive, increment) = self.integrated_piece::<M>(i);

            if remaining <= increment || i == last_piece {
                return primitive.newton_search(
                    piece,
                    remaining,
                    self.breaks[i],
                    self.breaks[i + 1],
                );
            }

            remaining -= increment;
        }

        last
    }
}
