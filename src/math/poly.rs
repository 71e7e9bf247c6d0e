//! Polynomial evaluation and least-squares polynomial fitting.
//!
//! Coefficients are always ordered **highest degree first**, matching the
//! convention of wavelength-solution files: `[p0, p1, p2]` means
//! `p0·x² + p1·x + p2`.
//!
//! Implementation choices:
//! - `polyval` uses Horner's scheme, so evaluation is one multiply-add per
//!   coefficient and numerically stable for the low degrees used here.
//! - `polyfit` solves the Vandermonde least-squares problem with SVD rather
//!   than normal equations. Vandermonde columns become nearly collinear for
//!   higher degrees or narrow axis windows, and SVD keeps those fits usable
//!   where a QR or normal-equation solve would fall over.

use nalgebra::{DMatrix, DVector};

/// Evaluate a polynomial with coefficients ordered highest degree first.
///
/// An empty coefficient slice evaluates to zero everywhere.
pub fn polyval(coeffs: &[f64], x: f64) -> f64 {
    let mut acc = 0.0;
    for &c in coeffs {
        acc = acc * x + c;
    }
    acc
}

/// Fit a polynomial of the given degree to `(x, y)` in the least-squares
/// sense. Returns coefficients highest degree first.
///
/// Returns `None` when the design matrix is too ill-conditioned to solve
/// robustly (for example a constant axis, or every flux sample NaN). Callers
/// treat a failed fit as a degenerate continuum and propagate NaN, so this
/// does not raise.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> Option<Vec<f64>> {
    if x.len() != y.len() || x.is_empty() {
        return None;
    }
    if y.iter().any(|v| !v.is_finite()) || x.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let n = x.len();
    let p = degree + 1;

    // Vandermonde design matrix, one column per power, highest first.
    let design = DMatrix::from_fn(n, p, |i, j| x[i].powi((degree - j) as i32));
    let rhs = DVector::from_row_slice(y);

    let beta = solve_least_squares(&design, &rhs)?;
    Some(beta.iter().copied().collect())
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
/// Tolerances are tried from strict to relaxed because near-degenerate
/// Vandermonde systems (short axis windows, high degrees) often still have a
/// perfectly usable minimum-norm solution. Also used for the square spline
/// collocation systems in [`crate::math::bspline`].
pub(crate) fn solve_least_squares(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = a.clone().svd(true, true);

    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(b, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyval_matches_horner_expansion() {
        // 2x^2 - 3x + 1 at x = 4: 32 - 12 + 1 = 21
        let y = polyval(&[2.0, -3.0, 1.0], 4.0);
        assert!((y - 21.0).abs() < 1e-12);
    }

    #[test]
    fn polyval_of_empty_coefficients_is_zero() {
        assert_eq!(polyval(&[], 3.5), 0.0);
    }

    #[test]
    fn polyval_constant() {
        assert_eq!(polyval(&[7.5], 123.0), 7.5);
    }

    #[test]
    fn polyfit_recovers_a_line_exactly() {
        // y = 2 + 3x on x = [0, 1, 2]
        let x = [0.0, 1.0, 2.0];
        let y = [2.0, 5.0, 8.0];
        let coeffs = polyfit(&x, &y, 1).unwrap();
        assert!((coeffs[0] - 3.0).abs() < 1e-10, "slope: {coeffs:?}");
        assert!((coeffs[1] - 2.0).abs() < 1e-10, "intercept: {coeffs:?}");
    }

    #[test]
    fn polyfit_recovers_a_quadratic_exactly() {
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|&v| 0.5 * v * v - 2.0 * v + 4.0).collect();
        let coeffs = polyfit(&x, &y, 2).unwrap();
        for (got, want) in coeffs.iter().zip([0.5, -2.0, 4.0]) {
            assert!((got - want).abs() < 1e-8, "{coeffs:?}");
        }
    }

    #[test]
    fn polyfit_roundtrips_through_polyval() {
        let x: Vec<f64> = (1..20).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|&v| polyval(&[1.0, -4.0, 2.0, 10.0], v)).collect();
        let coeffs = polyfit(&x, &y, 3).unwrap();
        for &xi in &x {
            let fit = polyval(&coeffs, xi);
            let truth = polyval(&[1.0, -4.0, 2.0, 10.0], xi);
            assert!((fit - truth).abs() < 1e-6);
        }
    }

    #[test]
    fn polyfit_rejects_nan_samples() {
        assert!(polyfit(&[0.0, 1.0, 2.0], &[1.0, f64::NAN, 3.0], 1).is_none());
    }

    #[test]
    fn polyfit_rejects_mismatched_input() {
        assert!(polyfit(&[0.0, 1.0], &[1.0], 1).is_none());
        assert!(polyfit(&[], &[], 0).is_none());
    }
}
