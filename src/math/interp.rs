//! 1-D interpolation with selectable kind and out-of-bounds policy.
//!
//! An [`Interp1d`] is built once from a source `(xs, ys)` pair and then
//! evaluated at arbitrary targets. The out-of-bounds policy is supplied at
//! evaluation time so one interpolant can serve both strict and padded
//! lookups:
//!
//! - `Raise`: any target outside the source range fails the whole call,
//!   before any value is produced
//! - `Fill(v)`: out-of-range targets evaluate to the sentinel (NaN default)
//! - `Extrapolate`: the underlying interpolant is continued beyond the ends

use crate::domain::{InterpKind, OutOfBounds};
use crate::error::SpectrumError;
use crate::math::bspline::{InterpSpline, MAX_DEGREE, MIN_DEGREE};

#[derive(Debug, Clone)]
enum Backend {
    Linear { xs: Vec<f64>, ys: Vec<f64> },
    Nearest { xs: Vec<f64>, ys: Vec<f64> },
    Spline(InterpSpline),
}

/// A 1-D interpolant over a strictly ascending sample grid.
#[derive(Debug, Clone)]
pub struct Interp1d {
    backend: Backend,
    x_min: f64,
    x_max: f64,
}

impl Interp1d {
    /// Build an interpolant of the requested kind.
    pub fn new(xs: &[f64], ys: &[f64], kind: InterpKind) -> Result<Self, SpectrumError> {
        if xs.len() != ys.len() {
            return Err(SpectrumError::LengthMismatch {
                axis: xs.len(),
                flux: ys.len(),
            });
        }
        if let InterpKind::Spline(order) = kind {
            if !(MIN_DEGREE..=MAX_DEGREE).contains(&order) {
                return Err(SpectrumError::InvalidDegree(order));
            }
        }
        if xs.len() < kind.min_points() {
            return Err(SpectrumError::TooFewPoints {
                needed: kind.min_points(),
                got: xs.len(),
            });
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SpectrumError::AxisNotAscending);
        }

        let backend = match kind {
            InterpKind::Linear => Backend::Linear {
                xs: xs.to_vec(),
                ys: ys.to_vec(),
            },
            InterpKind::Nearest => Backend::Nearest {
                xs: xs.to_vec(),
                ys: ys.to_vec(),
            },
            InterpKind::Spline(order) => Backend::Spline(InterpSpline::new(xs, ys, order)?),
        };

        Ok(Interp1d {
            backend,
            x_min: xs[0],
            x_max: xs[xs.len() - 1],
        })
    }

    /// Evaluate at every target under the given out-of-bounds policy.
    ///
    /// With `OutOfBounds::Raise` the range check runs over all targets first,
    /// so a failing call produces no values at all.
    pub fn evaluate_all(
        &self,
        targets: &[f64],
        bounds: OutOfBounds,
    ) -> Result<Vec<f64>, SpectrumError> {
        if bounds == OutOfBounds::Raise
            && targets.iter().any(|&x| x < self.x_min || x > self.x_max)
        {
            return Err(SpectrumError::TargetOutOfRange);
        }

        let out = targets
            .iter()
            .map(|&x| {
                if let OutOfBounds::Fill(sentinel) = bounds {
                    if x < self.x_min || x > self.x_max {
                        return sentinel;
                    }
                }
                self.eval_one(x)
            })
            .collect();
        Ok(out)
    }

    fn eval_one(&self, x: f64) -> f64 {
        match &self.backend {
            Backend::Linear { xs, ys } => {
                let seg = segment_index(xs, x);
                linear_interp((xs[seg], ys[seg]), (xs[seg + 1], ys[seg + 1]), x)
            }
            // Ties on an exact midpoint resolve to the lower sample.
            Backend::Nearest { xs, ys } => {
                if xs.len() == 1 || x <= xs[0] {
                    return ys[0];
                }
                if x >= xs[xs.len() - 1] {
                    return ys[ys.len() - 1];
                }
                let seg = segment_index(xs, x);
                if x - xs[seg] <= xs[seg + 1] - x {
                    ys[seg]
                } else {
                    ys[seg + 1]
                }
            }
            Backend::Spline(spline) => spline.evaluate(x),
        }
    }
}

/// Index of the segment used to evaluate at `x`, clamped to the end segments
/// so the same formula extrapolates beyond the grid.
fn segment_index(xs: &[f64], x: f64) -> usize {
    let n = xs.len();
    if x <= xs[0] {
        return 0;
    }
    if x >= xs[n - 1] {
        return n - 2;
    }
    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

fn linear_interp(a: (f64, f64), b: (f64, f64), x: f64) -> f64 {
    let (x0, y0) = a;
    let (x1, y1) = b;
    if (x1 - x0).abs() < 1e-12 {
        return y0;
    }
    let u = (x - x0) / (x1 - x0);
    y0 + u * (y1 - y0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const XS: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
    const YS: [f64; 5] = [2.0, 4.0, 6.0, 8.0, 10.0];

    #[test]
    fn linear_matches_the_reference_computation() {
        let interp = Interp1d::new(&XS, &YS, InterpKind::Linear).unwrap();
        let got = interp
            .evaluate_all(&[1.5, 2.0, 3.5, 4.0], OutOfBounds::default())
            .unwrap();
        for (g, want) in got.iter().zip([3.0, 4.0, 7.0, 8.0]) {
            assert!((g - want).abs() < 1e-12, "got {got:?}");
        }
    }

    #[test]
    fn default_policy_pads_out_of_range_with_nan() {
        let interp = Interp1d::new(&XS, &YS, InterpKind::Linear).unwrap();
        let got = interp
            .evaluate_all(&[0.0, 3.0, 6.0], OutOfBounds::default())
            .unwrap();
        assert!(got[0].is_nan());
        assert!((got[1] - 6.0).abs() < 1e-12);
        assert!(got[2].is_nan());
    }

    #[test]
    fn raise_policy_fails_before_producing_values() {
        let interp = Interp1d::new(&XS, &YS, InterpKind::Linear).unwrap();
        let err = interp
            .evaluate_all(&[3.0, 99.0], OutOfBounds::Raise)
            .unwrap_err();
        assert!(matches!(err, SpectrumError::TargetOutOfRange));
    }

    #[test]
    fn extrapolate_policy_extends_the_end_segments() {
        let interp = Interp1d::new(&XS, &YS, InterpKind::Linear).unwrap();
        let got = interp
            .evaluate_all(&[0.0, 6.0], OutOfBounds::Extrapolate)
            .unwrap();
        assert!((got[0] - 0.0).abs() < 1e-12);
        assert!((got[1] - 12.0).abs() < 1e-12);
    }

    #[test]
    fn nearest_snaps_to_the_closest_sample() {
        let interp = Interp1d::new(&XS, &YS, InterpKind::Nearest).unwrap();
        let got = interp
            .evaluate_all(&[1.2, 2.9, 4.6], OutOfBounds::default())
            .unwrap();
        assert_eq!(got, vec![2.0, 6.0, 10.0]);
    }

    #[test]
    fn spline_kind_reproduces_the_samples() {
        let ys = [1.0, 3.0, 2.0, 5.0, 4.0];
        let interp = Interp1d::new(&XS, &ys, InterpKind::Spline(3)).unwrap();
        let got = interp.evaluate_all(&XS, OutOfBounds::default()).unwrap();
        for (g, want) in got.iter().zip(ys) {
            assert!((g - want).abs() < 1e-8);
        }
    }

    #[test]
    fn spline_order_is_validated() {
        let err = Interp1d::new(&XS, &YS, InterpKind::Spline(7)).unwrap_err();
        assert!(matches!(err, SpectrumError::InvalidDegree(7)));
    }

    #[test]
    fn unsorted_grid_is_rejected() {
        let err = Interp1d::new(&[1.0, 3.0, 2.0], &[1.0, 2.0, 3.0], InterpKind::Linear).unwrap_err();
        assert!(matches!(err, SpectrumError::AxisNotAscending));
    }
}
