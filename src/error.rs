//! Error taxonomy for spectrum operations.
//!
//! Three families of failure exist:
//!
//! - **Type**: the wrong kind of thing was supplied (text where samples were
//!   expected, a spectrum where a scalar exponent was expected, an operation
//!   that needs an axis/flux that is absent).
//! - **Value**: the right kind of thing with an unacceptable value (length
//!   mismatches, non-overlapping axes, out-of-range resample targets, bad
//!   spline parameters).
//! - **Domain**: calibration lifecycle violations.
//!
//! Advisory conditions (tiny doppler velocities, empty-axis selection, the
//! cubic-interpolation caution) never surface here; they are logged warnings
//! and the operation degrades to a no-op or best effort.

use thiserror::Error;

/// Coarse classification of a [`SpectrumError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Type,
    Value,
    Domain,
}

/// All errors raised by spectrum operations.
///
/// Validation is eager: every operation checks its inputs before touching
/// stored state, so a returned error means the spectrum is exactly as it was
/// before the call.
#[derive(Debug, Clone, Error)]
pub enum SpectrumError {
    /// Text was supplied where numeric samples were expected. Guards against
    /// handing a file path to a constructor instead of the loaded data.
    #[error("cannot assign text to the {field} attribute")]
    TextSeries { field: &'static str },

    /// An operation that needs an axis was called on a spectrum without one.
    #[error("spectrum has no axis to {op}")]
    MissingAxis { op: &'static str },

    /// An operation that needs flux was called on a spectrum without any.
    #[error("spectrum has no flux to {op}")]
    MissingFlux { op: &'static str },

    /// A spectrum was used as an exponent.
    #[error("cannot raise a spectrum to a spectrum power")]
    SpectrumExponent,

    /// Axis and flux lengths disagree.
    #[error("the length of axis ({axis}) and flux ({flux}) must be the same")]
    LengthMismatch { axis: usize, flux: usize },

    /// A raw array operand does not match the flux length.
    #[error("array operand has {got} samples but the spectrum has {expected}")]
    OperandLength { expected: usize, got: usize },

    /// The spectrum is already calibrated and cannot be recalibrated.
    #[error("spectrum is already calibrated, not recalibrating")]
    AlreadyCalibrated,

    /// A wavelength solution produced zero or negative wavelengths, which
    /// cannot be doppler shifted.
    #[error(
        "wavelength solution contains zero or negative values; wavelengths \
         must be strictly positive"
    )]
    NonPositiveWavelength,

    /// Two spectra with different calibration states were combined.
    #[error("spectra are not calibrated similarly")]
    CalibrationMismatch,

    /// Two spectra whose axes do not overlap at all were combined.
    #[error("the axes do not overlap so cannot be interpolated")]
    NoOverlap,

    /// A resample target lies outside the interpolation range and bounds
    /// checking was requested.
    #[error("a value in the target axis is outside the interpolation range")]
    TargetOutOfRange,

    /// Indexing with a value kind that is deliberately rejected.
    #[error("cannot index a spectrum with a {0} value")]
    UnsupportedIndex(&'static str),

    /// An index position beyond the end of the spectrum.
    #[error("index {index} is out of range for a spectrum of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// An interpolation method string that is not one of the known set.
    #[error("unknown interpolation method '{0}' (expected 'linear' or 'spline')")]
    UnknownInterpMethod(String),

    /// A spline degree outside the supported 1..=5 range.
    #[error("spline degree must be between 1 and 5, got {0}")]
    InvalidDegree(usize),

    /// Too few samples for the requested interpolation order.
    #[error("interpolation of this order needs at least {needed} points, got {got}")]
    TooFewPoints { needed: usize, got: usize },

    /// The axis must be strictly ascending to build an interpolant.
    #[error("axis values must be strictly ascending to interpolate")]
    AxisNotAscending,

    /// Spline weights were the wrong length or not strictly positive.
    #[error("invalid spline weights: {0}")]
    InvalidWeights(&'static str),

    /// A boundary box that does not enclose the data interval.
    #[error("boundary box must enclose the axis interval")]
    InvalidBbox,

    /// The spline collocation system could not be solved.
    #[error("interpolating spline system could not be solved")]
    SplineSolveFailed,
}

impl SpectrumError {
    /// Which family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        use SpectrumError::*;
        match self {
            TextSeries { .. } | MissingAxis { .. } | MissingFlux { .. } | SpectrumExponent => {
                ErrorKind::Type
            }
            LengthMismatch { .. }
            | OperandLength { .. }
            | NoOverlap
            | TargetOutOfRange
            | UnsupportedIndex(_)
            | IndexOutOfRange { .. }
            | UnknownInterpMethod(_)
            | InvalidDegree(_)
            | TooFewPoints { .. }
            | AxisNotAscending
            | InvalidWeights(_)
            | InvalidBbox
            | SplineSolveFailed => ErrorKind::Value,
            AlreadyCalibrated | NonPositiveWavelength | CalibrationMismatch => ErrorKind::Domain,
        }
    }
}
