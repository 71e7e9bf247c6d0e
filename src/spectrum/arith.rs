//! Elementwise arithmetic composition of spectra.
//!
//! Binary operations accept a scalar, a raw array, or another spectrum.
//! When the operand is a spectrum on a different axis, a *copy* of it is
//! resampled onto this spectrum's axis first (using this spectrum's
//! configured strategy), so:
//!
//! - `len(a op b) == len(a)`: the left operand's axis always wins
//! - `a + b` and `b + a` generally differ in shape; they only agree in
//!   value when the axes already match
//!
//! This asymmetry is deliberate and mirrors how template spectra are
//! combined against observations. The result always carries the left
//! operand's axis, header, calibration flag, and interp method.
//!
//! The `std::ops` operators are implemented for references with a
//! `Result` output: composition can fail by design (calibration mismatch,
//! disjoint axes), and those failures belong to the caller, not a panic.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::domain::{InterpKind, InterpMethod, OutOfBounds};
use crate::error::SpectrumError;
use crate::spectrum::Spectrum;
use crate::spectrum::resample::SplineOptions;

/// A right-hand operand for spectrum arithmetic.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Scalar(f64),
    Array(&'a [f64]),
    Spectrum(&'a Spectrum),
}

impl From<f64> for Operand<'_> {
    fn from(v: f64) -> Self {
        Operand::Scalar(v)
    }
}

impl<'a> From<&'a [f64]> for Operand<'a> {
    fn from(values: &'a [f64]) -> Self {
        Operand::Array(values)
    }
}

impl<'a> From<&'a Vec<f64>> for Operand<'a> {
    fn from(values: &'a Vec<f64>) -> Self {
        Operand::Array(values.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for Operand<'a> {
    fn from(values: &'a [f64; N]) -> Self {
        Operand::Array(values.as_slice())
    }
}

impl<'a> From<&'a Spectrum> for Operand<'a> {
    fn from(s: &'a Spectrum) -> Self {
        Operand::Spectrum(s)
    }
}

impl Spectrum {
    /// Elementwise addition. See the module docs for the axis rules.
    pub fn try_add<'a>(
        &self,
        other: impl Into<Operand<'a>>,
    ) -> Result<Spectrum, SpectrumError> {
        self.binary_op(other.into(), |a, b| a + b)
    }

    /// Elementwise subtraction.
    pub fn try_sub<'a>(
        &self,
        other: impl Into<Operand<'a>>,
    ) -> Result<Spectrum, SpectrumError> {
        self.binary_op(other.into(), |a, b| a - b)
    }

    /// Elementwise multiplication.
    pub fn try_mul<'a>(
        &self,
        other: impl Into<Operand<'a>>,
    ) -> Result<Spectrum, SpectrumError> {
        self.binary_op(other.into(), |a, b| a * b)
    }

    /// Elementwise division. Division by zero follows IEEE float semantics
    /// (infinities and NaNs in the flux, never an error).
    pub fn try_div<'a>(
        &self,
        other: impl Into<Operand<'a>>,
    ) -> Result<Spectrum, SpectrumError> {
        self.binary_op(other.into(), |a, b| a / b)
    }

    /// Raise the flux to a power. The exponent may be a scalar or an array;
    /// a spectrum exponent is rejected with a type error.
    pub fn try_pow<'a>(
        &self,
        exponent: impl Into<Operand<'a>>,
    ) -> Result<Spectrum, SpectrumError> {
        match exponent.into() {
            Operand::Spectrum(_) => Err(SpectrumError::SpectrumExponent),
            other => self.binary_op(other, f64::powf),
        }
    }

    /// A new spectrum with negated flux and everything else unchanged.
    pub fn negated(&self) -> Spectrum {
        self.map_flux(|f| -f)
    }

    /// A new spectrum with the absolute value of the flux.
    pub fn abs(&self) -> Spectrum {
        self.map_flux(f64::abs)
    }

    fn map_flux(&self, f: impl Fn(f64) -> f64) -> Spectrum {
        Spectrum {
            axis: self.axis.clone(),
            flux: self
                .flux
                .as_ref()
                .map(|flux| flux.iter().map(|&v| f(v)).collect()),
            calibrated: self.calibrated,
            header: self.header.clone(),
            interp_method: self.interp_method,
        }
    }

    fn binary_op(
        &self,
        other: Operand<'_>,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Spectrum, SpectrumError> {
        let flux = self
            .flux
            .as_ref()
            .ok_or(SpectrumError::MissingFlux { op: "combine" })?;
        let prepared = self.prepare_other(flux.len(), other)?;

        let new_flux: Vec<f64> = match prepared {
            Prepared::Scalar(k) => flux.iter().map(|&a| f(a, k)).collect(),
            Prepared::Samples(values) => {
                flux.iter().zip(values.iter()).map(|(&a, &b)| f(a, b)).collect()
            }
        };

        Ok(Spectrum {
            axis: self.axis.clone(),
            flux: Some(new_flux),
            calibrated: self.calibrated,
            header: self.header.clone(),
            interp_method: self.interp_method,
        })
    }

    /// Align the operand with this spectrum's flux.
    ///
    /// For a spectrum operand: calibration states must match; an identical
    /// axis is used as-is; otherwise the axes must overlap and a copy of the
    /// operand is resampled onto this spectrum's axis.
    fn prepare_other(
        &self,
        flux_len: usize,
        other: Operand<'_>,
    ) -> Result<Prepared, SpectrumError> {
        match other {
            Operand::Scalar(k) => Ok(Prepared::Scalar(k)),
            Operand::Array(values) => {
                if values.len() != flux_len {
                    return Err(SpectrumError::OperandLength {
                        expected: flux_len,
                        got: values.len(),
                    });
                }
                Ok(Prepared::Samples(values.to_vec()))
            }
            Operand::Spectrum(other) => {
                if self.calibrated != other.calibrated {
                    return Err(SpectrumError::CalibrationMismatch);
                }
                let axis = self
                    .axis
                    .as_ref()
                    .ok_or(SpectrumError::MissingAxis { op: "combine" })?;
                let other_axis = other
                    .axis
                    .as_ref()
                    .ok_or(SpectrumError::MissingAxis { op: "combine" })?;
                let other_flux = other
                    .flux
                    .as_ref()
                    .ok_or(SpectrumError::MissingFlux { op: "combine" })?;

                if axis == other_axis {
                    return Ok(Prepared::Samples(other_flux.clone()));
                }

                let (lo, hi) = range_of(axis);
                let (other_lo, other_hi) = range_of(other_axis);
                if lo > other_hi || hi < other_lo {
                    return Err(SpectrumError::NoOverlap);
                }

                let mut resampled = other.clone();
                match self.interp_method {
                    InterpMethod::Spline => {
                        resampled.spline_interpolate_to(self, &SplineOptions::default())?;
                    }
                    InterpMethod::Linear => {
                        resampled.interpolate1d_to(
                            self,
                            InterpKind::Linear,
                            OutOfBounds::default(),
                        )?;
                    }
                }
                resampled
                    .flux
                    .take()
                    .map(Prepared::Samples)
                    .ok_or(SpectrumError::MissingFlux { op: "combine" })
            }
        }
    }
}

enum Prepared {
    Scalar(f64),
    Samples(Vec<f64>),
}

fn range_of(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}

// ---------------------------------------------------------------------------
// Operator sugar
// ---------------------------------------------------------------------------

macro_rules! spectrum_binop {
    ($trait:ident, $method:ident, $try_method:ident) => {
        impl $trait<&Spectrum> for &Spectrum {
            type Output = Result<Spectrum, SpectrumError>;

            fn $method(self, rhs: &Spectrum) -> Self::Output {
                self.$try_method(rhs)
            }
        }

        impl $trait<f64> for &Spectrum {
            type Output = Result<Spectrum, SpectrumError>;

            fn $method(self, rhs: f64) -> Self::Output {
                self.$try_method(rhs)
            }
        }
    };
}

spectrum_binop!(Add, add, try_add);
spectrum_binop!(Sub, sub, try_sub);
spectrum_binop!(Mul, mul, try_mul);
spectrum_binop!(Div, div, try_div);

/// Right-addition: `k + spectrum` matches `spectrum + k`.
impl Add<&Spectrum> for f64 {
    type Output = Result<Spectrum, SpectrumError>;

    fn add(self, rhs: &Spectrum) -> Self::Output {
        rhs.try_add(self)
    }
}

impl Neg for &Spectrum {
    type Output = Spectrum;

    fn neg(self) -> Spectrum {
        self.negated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HeaderValue;

    fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| lo + (hi - lo) * i as f64 / (n as f64 - 1.0))
            .collect()
    }

    fn spectrum_on(axis: Vec<f64>, flux_level: f64) -> Spectrum {
        let flux: Vec<f64> = axis.iter().map(|&x| flux_level + 0.01 * x).collect();
        Spectrum::new(flux, axis).unwrap()
    }

    #[test]
    fn scalar_operations_hit_every_sample() {
        let s = Spectrum::new(vec![1.0, 2.0, 3.0], vec![10.0, 11.0, 12.0]).unwrap();
        assert_eq!(s.try_add(1.0).unwrap().flux().unwrap(), &[2.0, 3.0, 4.0]);
        assert_eq!(s.try_sub(1.0).unwrap().flux().unwrap(), &[0.0, 1.0, 2.0]);
        assert_eq!(s.try_mul(2.0).unwrap().flux().unwrap(), &[2.0, 4.0, 6.0]);
        assert_eq!(s.try_div(2.0).unwrap().flux().unwrap(), &[0.5, 1.0, 1.5]);
    }

    #[test]
    fn operator_sugar_matches_the_named_methods() {
        let a = Spectrum::new(vec![1.0, 2.0], vec![0.0, 1.0]).unwrap();
        let b = Spectrum::new(vec![10.0, 20.0], vec![0.0, 1.0]).unwrap();
        assert_eq!((&a + &b).unwrap().flux().unwrap(), &[11.0, 22.0]);
        assert_eq!((&b - &a).unwrap().flux().unwrap(), &[9.0, 18.0]);
        assert_eq!((&a * 3.0).unwrap().flux().unwrap(), &[3.0, 6.0]);
        assert_eq!((2.0 + &a).unwrap().flux().unwrap(), &[3.0, 4.0]);
    }

    #[test]
    fn equal_axes_use_the_other_flux_directly() {
        let a = Spectrum::new(vec![1.0, 2.0, 3.0], vec![5.0, 6.0, 7.0]).unwrap();
        let b = Spectrum::new(vec![0.5, 0.5, 0.5], vec![5.0, 6.0, 7.0]).unwrap();
        let sum = a.try_add(&b).unwrap();
        assert_eq!(sum.flux().unwrap(), &[1.5, 2.5, 3.5]);
        assert_eq!(sum.axis().unwrap(), &[5.0, 6.0, 7.0]);
    }

    #[test]
    fn mismatched_axes_resample_onto_the_left_operand() {
        let a = spectrum_on(linspace(2100.0, 2150.0, 10), 1.0);
        let b = spectrum_on(linspace(2090.0, 2160.0, 15), 2.0);

        let ab = a.try_add(&b).unwrap();
        let ba = b.try_add(&a).unwrap();
        assert_eq!(ab.len(), 10);
        assert_eq!(ba.len(), 15);
        assert_eq!(ab.axis().unwrap(), a.axis().unwrap());

        // Both operands keep their own data.
        assert_eq!(a.len(), 10);
        assert_eq!(b.len(), 15);
    }

    #[test]
    fn resampled_addition_is_close_to_the_analytic_sum() {
        let a = spectrum_on(linspace(2105.0, 2145.0, 30), 1.0);
        let b = spectrum_on(linspace(2100.0, 2150.0, 50), 2.0);

        let sum = a.try_add(&b).unwrap();
        for (&x, &f) in sum.axis().unwrap().iter().zip(sum.flux().unwrap()) {
            let expected = (1.0 + 0.01 * x) + (2.0 + 0.01 * x);
            assert!((f - expected).abs() < 1e-6, "at {x}: {f} vs {expected}");
        }
    }

    #[test]
    fn calibration_mismatch_is_a_domain_error() {
        let a = spectrum_on(linspace(0.0, 10.0, 5), 1.0);
        let b = spectrum_on(linspace(0.0, 10.0, 5), 1.0).with_calibrated(false);
        let err = a.try_add(&b).unwrap_err();
        assert!(matches!(err, SpectrumError::CalibrationMismatch));
    }

    #[test]
    fn disjoint_axes_are_a_value_error() {
        let a = spectrum_on(linspace(100.0, 200.0, 8), 1.0);
        let b = spectrum_on(linspace(300.0, 400.0, 8), 1.0);
        let err = a.try_mul(&b).unwrap_err();
        assert!(matches!(err, SpectrumError::NoOverlap));
    }

    #[test]
    fn array_operands_must_match_the_flux_length() {
        let s = Spectrum::new(vec![1.0, 2.0, 3.0], vec![0.0, 1.0, 2.0]).unwrap();
        assert_eq!(
            s.try_add(&[1.0, 1.0, 1.0]).unwrap().flux().unwrap(),
            &[2.0, 3.0, 4.0]
        );
        let err = s.try_add(&[1.0, 1.0]).unwrap_err();
        assert!(matches!(err, SpectrumError::OperandLength { expected: 3, got: 2 }));
    }

    #[test]
    fn pow_rejects_a_spectrum_exponent() {
        let a = Spectrum::new(vec![2.0, 3.0], vec![0.0, 1.0]).unwrap();
        let b = Spectrum::new(vec![2.0, 2.0], vec![0.0, 1.0]).unwrap();
        let err = a.try_pow(&b).unwrap_err();
        assert!(matches!(err, SpectrumError::SpectrumExponent));

        assert_eq!(a.try_pow(2.0).unwrap().flux().unwrap(), &[4.0, 9.0]);
        assert_eq!(a.try_pow(&[2.0, 3.0]).unwrap().flux().unwrap(), &[4.0, 27.0]);
    }

    #[test]
    fn results_carry_the_left_operands_identity() {
        let mut a = spectrum_on(linspace(0.0, 10.0, 6), 1.0);
        a.header_mut().insert("id".to_string(), HeaderValue::Text("A".into()));
        let b = spectrum_on(linspace(0.0, 10.0, 6), 2.0);

        let sum = a.try_add(&b).unwrap();
        assert_eq!(sum.header().get("id"), Some(&HeaderValue::Text("A".into())));
        assert!(sum.calibrated());
        assert_eq!(sum.interp_method(), a.interp_method());
    }

    #[test]
    fn negation_and_abs_transform_only_the_flux() {
        let s = Spectrum::new(vec![1.0, -2.0], vec![0.0, 1.0]).unwrap();
        let neg = -&s;
        assert_eq!(neg.flux().unwrap(), &[-1.0, 2.0]);
        assert_eq!(neg.axis().unwrap(), s.axis().unwrap());

        let abs = s.abs();
        assert_eq!(abs.flux().unwrap(), &[1.0, 2.0]);
    }

    #[test]
    fn division_by_zero_follows_float_semantics() {
        let a = Spectrum::new(vec![1.0, 0.0], vec![0.0, 1.0]).unwrap();
        let b = Spectrum::new(vec![0.0, 0.0], vec![0.0, 1.0]).unwrap();
        let q = a.try_div(&b).unwrap();
        let flux = q.flux().unwrap();
        assert!(flux[0].is_infinite());
        assert!(flux[1].is_nan());
    }

    #[test]
    fn linear_interp_method_is_honored_for_resampling() {
        let mut a = spectrum_on(linspace(2105.0, 2145.0, 10), 1.0);
        a.set_interp_method(InterpMethod::Linear);
        let b = spectrum_on(linspace(2100.0, 2150.0, 40), 2.0);

        // Both operands are linear ramps, so linear resampling is exact.
        let sum = a.try_add(&b).unwrap();
        for (&x, &f) in sum.axis().unwrap().iter().zip(sum.flux().unwrap()) {
            let expected = (1.0 + 0.01 * x) + (2.0 + 0.01 * x);
            assert!((f - expected).abs() < 1e-9);
        }
    }
}
