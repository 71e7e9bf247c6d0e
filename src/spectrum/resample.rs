//! Resampling the flux onto a new axis.
//!
//! Two interchangeable strategies share one contract: build an interpolant
//! from the current `(axis, flux)` pair, evaluate it at the target axis, and
//! replace both sequences. All validation (and, when requested, the bounds
//! check) runs before anything is assigned, and the new flux/axis pair is
//! committed in one step, so a failing call leaves the spectrum exactly as
//! it was.

use log::warn;

use crate::domain::{InterpKind, OutOfBounds};
use crate::error::SpectrumError;
use crate::math::{Interp1d, InterpSpline};
use crate::spectrum::Spectrum;

/// Where a resample gets its target axis from: another spectrum (borrowing
/// its axis) or a raw axis slice.
#[derive(Debug, Clone, Copy)]
pub enum ResampleTarget<'a> {
    Spectrum(&'a Spectrum),
    Axis(&'a [f64]),
}

impl<'a> ResampleTarget<'a> {
    /// The target axis samples.
    fn resolve(self) -> Result<&'a [f64], SpectrumError> {
        match self {
            ResampleTarget::Spectrum(other) => other
                .axis()
                .ok_or(SpectrumError::MissingAxis { op: "interpolate to" }),
            ResampleTarget::Axis(axis) => Ok(axis),
        }
    }
}

impl<'a> From<&'a Spectrum> for ResampleTarget<'a> {
    fn from(s: &'a Spectrum) -> Self {
        ResampleTarget::Spectrum(s)
    }
}

impl<'a> From<&'a [f64]> for ResampleTarget<'a> {
    fn from(axis: &'a [f64]) -> Self {
        ResampleTarget::Axis(axis)
    }
}

impl<'a> From<&'a Vec<f64>> for ResampleTarget<'a> {
    fn from(axis: &'a Vec<f64>) -> Self {
        ResampleTarget::Axis(axis.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for ResampleTarget<'a> {
    fn from(axis: &'a [f64; N]) -> Self {
        ResampleTarget::Axis(axis.as_slice())
    }
}

/// Parameters for [`Spectrum::spline_interpolate_to`].
///
/// Defaults mirror the usual exact-fit cubic setup: degree 3, uniform
/// weights, the data interval as boundary box, and no bounds error.
#[derive(Debug, Clone)]
pub struct SplineOptions {
    /// Spline degree, 1..=5.
    pub degree: usize,
    /// Optional strictly positive per-point weights.
    pub weights: Option<Vec<f64>>,
    /// Optional `[lo, hi]` approximation interval enclosing the axis.
    pub bbox: Option<[f64; 2]>,
    /// Fail (before mutating) if any target lies outside the axis range.
    pub bounds_error: bool,
}

impl Default for SplineOptions {
    fn default() -> Self {
        SplineOptions {
            degree: 3,
            weights: None,
            bbox: None,
            bounds_error: false,
        }
    }
}

impl Spectrum {
    /// Resample the flux onto a new axis with a selectable interpolation
    /// kind and out-of-bounds policy.
    ///
    /// The interpolant is built from the current `(axis, flux)` pair and
    /// evaluated at the target axis, which then becomes this spectrum's
    /// axis. The cubic spline kind logs a caution: high-order polynomial
    /// interpolation over dense spectra can ring near sharp lines.
    pub fn interpolate1d_to<'a>(
        &mut self,
        target: impl Into<ResampleTarget<'a>>,
        kind: InterpKind,
        bounds: OutOfBounds,
    ) -> Result<(), SpectrumError> {
        if kind == InterpKind::Spline(3) {
            warn!("cubic interpolation can be unstable over dense spectra");
        }

        let axis = self
            .axis
            .as_ref()
            .ok_or(SpectrumError::MissingAxis { op: "interpolate from" })?;
        let flux = self
            .flux
            .as_ref()
            .ok_or(SpectrumError::MissingFlux { op: "interpolate from" })?;

        let target = target.into().resolve()?;
        let interp = Interp1d::new(axis, flux, kind)?;
        let new_flux = interp.evaluate_all(target, bounds)?;

        self.flux = Some(new_flux);
        self.axis = Some(target.to_vec());
        Ok(())
    }

    /// Resample the flux onto a new axis with an exact-fit interpolating
    /// spline.
    ///
    /// The spline passes through every current sample. Target points outside
    /// the current axis range are always forced to NaN in the result (even
    /// though the underlying spline could extrapolate), and when
    /// `opts.bounds_error` is set any such point instead fails the whole
    /// call with a value error, checked before any mutation.
    pub fn spline_interpolate_to<'a>(
        &mut self,
        target: impl Into<ResampleTarget<'a>>,
        opts: &SplineOptions,
    ) -> Result<(), SpectrumError> {
        let axis = self
            .axis
            .as_ref()
            .ok_or(SpectrumError::MissingAxis { op: "interpolate from" })?;
        let flux = self
            .flux
            .as_ref()
            .ok_or(SpectrumError::MissingFlux { op: "interpolate from" })?;

        let target = target.into().resolve()?;
        let spline = InterpSpline::with_params(
            axis,
            flux,
            opts.degree,
            opts.weights.as_deref(),
            opts.bbox,
        )?;

        // The spline construction has already verified the axis is
        // ascending, so the range is just the end samples.
        let (lo, hi) = (axis[0], axis[axis.len() - 1]);
        let out_of_range = |x: f64| x < lo || x > hi;

        if opts.bounds_error && target.iter().any(|&x| out_of_range(x)) {
            return Err(SpectrumError::TargetOutOfRange);
        }

        let new_flux: Vec<f64> = target
            .iter()
            .map(|&x| if out_of_range(x) { f64::NAN } else { spline.evaluate(x) })
            .collect();

        self.flux = Some(new_flux);
        self.axis = Some(target.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Spectrum {
        Spectrum::new(vec![2.0, 4.0, 6.0, 8.0, 10.0], vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap()
    }

    #[test]
    fn linear_resample_onto_a_raw_axis() {
        let mut s = line();
        s.interpolate1d_to(&[1.5, 2.0, 3.5, 4.0], InterpKind::Linear, OutOfBounds::default())
            .unwrap();
        assert_eq!(s.axis().unwrap(), &[1.5, 2.0, 3.5, 4.0]);
        let flux = s.flux().unwrap();
        for (f, want) in flux.iter().zip([3.0, 4.0, 7.0, 8.0]) {
            assert!((f - want).abs() < 1e-12, "{flux:?}");
        }
    }

    #[test]
    fn resample_onto_another_spectrum_takes_its_axis() {
        let mut s = line();
        let reference = Spectrum::new(vec![0.0, 0.0, 0.0], vec![2.0, 3.0, 4.0]).unwrap();
        s.interpolate1d_to(&reference, InterpKind::Linear, OutOfBounds::default())
            .unwrap();
        assert_eq!(s.axis().unwrap(), &[2.0, 3.0, 4.0]);
        assert_eq!(s.flux().unwrap(), &[4.0, 6.0, 8.0]);
        // The reference spectrum is only borrowed.
        assert_eq!(reference.flux().unwrap(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn raise_policy_fails_without_touching_state() {
        let mut s = line();
        let before = s.clone();
        let err = s
            .interpolate1d_to(&[0.0, 3.0], InterpKind::Linear, OutOfBounds::Raise)
            .unwrap_err();
        assert!(matches!(err, SpectrumError::TargetOutOfRange));
        assert_eq!(s, before);
    }

    #[test]
    fn spline_resample_reproduces_sample_points() {
        let mut s = Spectrum::new(
            vec![1.0, 3.0, 2.0, 5.0, 4.0, 6.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )
        .unwrap();
        let original_flux = s.flux().unwrap().to_vec();
        let original_axis = s.axis().unwrap().to_vec();

        s.spline_interpolate_to(&original_axis, &SplineOptions::default())
            .unwrap();
        for (f, want) in s.flux().unwrap().iter().zip(original_flux) {
            assert!((f - want).abs() < 1e-8);
        }
    }

    #[test]
    fn spline_pads_outside_targets_with_nan() {
        let mut s = line();
        s.spline_interpolate_to(&[0.5, 2.0, 4.0, 9.0], &SplineOptions::default())
            .unwrap();
        let flux = s.flux().unwrap();
        assert!(flux[0].is_nan());
        assert!(flux[1].is_finite());
        assert!(flux[2].is_finite());
        assert!(flux[3].is_nan());
    }

    #[test]
    fn spline_bounds_error_fails_the_whole_call() {
        let mut s = line();
        let before = s.clone();
        let opts = SplineOptions {
            bounds_error: true,
            ..SplineOptions::default()
        };
        let err = s.spline_interpolate_to(&[2.0, 9.0], &opts).unwrap_err();
        assert!(matches!(err, SpectrumError::TargetOutOfRange));
        assert_eq!(s, before);
    }

    #[test]
    fn spline_degree_is_configurable() {
        let mut s = line();
        let opts = SplineOptions {
            degree: 1,
            ..SplineOptions::default()
        };
        s.spline_interpolate_to(&[1.5, 4.5], &opts).unwrap();
        let flux = s.flux().unwrap();
        assert!((flux[0] - 3.0).abs() < 1e-9);
        assert!((flux[1] - 9.0).abs() < 1e-9);
    }

    #[test]
    fn interpolating_an_empty_spectrum_is_a_type_error() {
        let mut s = Spectrum::empty();
        let err = s
            .interpolate1d_to(&[1.0, 2.0], InterpKind::Linear, OutOfBounds::default())
            .unwrap_err();
        assert!(matches!(err, SpectrumError::MissingAxis { .. }));
    }
}
