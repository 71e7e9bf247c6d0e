//! Exact-fit interpolating B-splines of degree 1 to 5.
//!
//! The spline passes through every supplied point. Construction builds a
//! clamped knot vector from the data sites, fills the collocation matrix
//! with Cox–de Boor basis values, and solves the square system for the
//! control coefficients; evaluation runs de Boor's algorithm.
//!
//! Numerical notes:
//! - Knot placement follows the standard interpolation scheme: for odd
//!   degrees the interior knots sit on data sites, for even degrees on
//!   midpoints between sites. Both satisfy the Schoenberg–Whitney condition,
//!   so the collocation system is nonsingular for strictly ascending sites.
//! - Evaluation outside the data interval clamps to the boundary span, which
//!   continues the end polynomial (extrapolation). Callers that want NaN
//!   padding or bounds errors apply those policies on top.

use nalgebra::{DMatrix, DVector};

use crate::error::SpectrumError;
use crate::math::poly::solve_least_squares;

/// Lowest supported spline degree.
pub const MIN_DEGREE: usize = 1;
/// Highest supported spline degree.
pub const MAX_DEGREE: usize = 5;

/// An interpolating B-spline fitted through every data point.
#[derive(Debug, Clone)]
pub struct InterpSpline {
    degree: usize,
    /// Clamped knot vector, length `n + degree + 1`.
    knots: Vec<f64>,
    /// Control coefficients, one per data point.
    coeffs: Vec<f64>,
}

impl InterpSpline {
    /// Fit a spline of the given degree through `(xs, ys)` with uniform
    /// weights and the data interval as boundary box.
    pub fn new(xs: &[f64], ys: &[f64], degree: usize) -> Result<Self, SpectrumError> {
        Self::with_params(xs, ys, degree, None, None)
    }

    /// Fit with optional per-point weights and an explicit boundary box.
    ///
    /// Weights must be strictly positive and finite, one per point. The
    /// boundary box must enclose the data interval. An exact-fit spline
    /// passes through all points for any valid weights; the parameters are
    /// accepted for conditioning and interface parity with smoothing fits.
    pub fn with_params(
        xs: &[f64],
        ys: &[f64],
        degree: usize,
        weights: Option<&[f64]>,
        bbox: Option<[f64; 2]>,
    ) -> Result<Self, SpectrumError> {
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&degree) {
            return Err(SpectrumError::InvalidDegree(degree));
        }
        if xs.len() != ys.len() {
            return Err(SpectrumError::LengthMismatch {
                axis: xs.len(),
                flux: ys.len(),
            });
        }
        let n = xs.len();
        if n < degree + 1 {
            return Err(SpectrumError::TooFewPoints {
                needed: degree + 1,
                got: n,
            });
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SpectrumError::AxisNotAscending);
        }
        if let Some(w) = weights {
            if w.len() != n {
                return Err(SpectrumError::InvalidWeights("length must match the data"));
            }
            if w.iter().any(|v| !v.is_finite() || *v <= 0.0) {
                return Err(SpectrumError::InvalidWeights("must be strictly positive"));
            }
        }
        let [lo, hi] = bbox.unwrap_or([xs[0], xs[n - 1]]);
        if !(lo.is_finite() && hi.is_finite()) || lo > xs[0] || hi < xs[n - 1] {
            return Err(SpectrumError::InvalidBbox);
        }

        let knots = interpolation_knots(xs, degree, lo, hi);

        // Collocation: row i holds the k+1 basis values that are nonzero at
        // xs[i]. Row scaling by sqrt(w) keeps the weighted and unweighted
        // systems interchangeable for the solver.
        let mut design = DMatrix::zeros(n, n);
        let mut rhs = DVector::zeros(n);
        for i in 0..n {
            let scale = weights.map_or(1.0, |w| w[i].sqrt());
            let span = find_span(&knots, degree, n, xs[i]);
            let basis = basis_values(&knots, degree, span, xs[i]);
            for (j, b) in basis.iter().enumerate() {
                design[(i, span - degree + j)] = scale * b;
            }
            rhs[i] = scale * ys[i];
        }

        let coeffs = solve_least_squares(&design, &rhs)
            .ok_or(SpectrumError::SplineSolveFailed)?
            .iter()
            .copied()
            .collect();

        Ok(InterpSpline {
            degree,
            knots,
            coeffs,
        })
    }

    /// Spline degree.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Evaluate at `x` via de Boor's algorithm.
    ///
    /// Outside the knot interval the boundary polynomial is continued.
    pub fn evaluate(&self, x: f64) -> f64 {
        let k = self.degree;
        let n = self.coeffs.len();
        let t = &self.knots;
        let span = find_span(t, k, n, x);

        let mut d: Vec<f64> = (0..=k).map(|j| self.coeffs[span - k + j]).collect();
        for r in 1..=k {
            for j in (r..=k).rev() {
                let i = span - k + j;
                let denom = t[i + k + 1 - r] - t[i];
                let alpha = if denom != 0.0 { (x - t[i]) / denom } else { 0.0 };
                d[j] = (1.0 - alpha) * d[j - 1] + alpha * d[j];
            }
        }
        d[k]
    }
}

/// Clamped knot vector for interpolation at the given sites.
fn interpolation_knots(xs: &[f64], degree: usize, lo: f64, hi: f64) -> Vec<f64> {
    let n = xs.len();
    let mut knots = Vec::with_capacity(n + degree + 1);

    knots.extend(std::iter::repeat_n(lo, degree + 1));
    if degree % 2 == 1 {
        // Odd degree: interior knots on data sites.
        let offset = (degree + 1) / 2;
        for j in 0..n.saturating_sub(degree + 1) {
            knots.push(xs[j + offset]);
        }
    } else {
        // Even degree: interior knots on midpoints between sites.
        let offset = degree / 2;
        for j in 0..n.saturating_sub(degree + 1) {
            knots.push(0.5 * (xs[j + offset] + xs[j + offset + 1]));
        }
    }
    knots.extend(std::iter::repeat_n(hi, degree + 1));
    knots
}

/// Largest span index `i` in `[degree, n-1]` with `t[i] <= x < t[i+1]`,
/// clamped at both ends so out-of-range evaluation lands on a boundary span.
fn find_span(t: &[f64], degree: usize, n: usize, x: f64) -> usize {
    if x >= t[n] {
        return n - 1;
    }
    if x <= t[degree] {
        return degree;
    }
    let mut lo = degree;
    let mut hi = n;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if t[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

/// All `degree + 1` basis values that are nonzero on the given span,
/// computed with the Cox–de Boor recurrence.
fn basis_values(t: &[f64], degree: usize, span: usize, x: f64) -> Vec<f64> {
    let mut values = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    values[0] = 1.0;

    for j in 1..=degree {
        left[j] = x - t[span + 1 - j];
        right[j] = t[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let denom = right[r + 1] + left[j - r];
            let term = if denom != 0.0 { values[r] / denom } else { 0.0 };
            values[r] = saved + right[r + 1] * term;
            saved = left[j - r] * term;
        }
        values[j] = saved;
    }
    values
}
