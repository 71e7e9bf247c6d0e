//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they
//! can be:
//!
//! - used in-memory by the spectrum operations
//! - exported to JSON reports
//! - parsed back from CLI flags and config strings

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SpectrumError;

/// Which resampling strategy arithmetic composition uses when two spectra
/// with different axes are combined.
///
/// The strategy is carried on each spectrum and applies when *that* spectrum
/// is the left operand. Unrecognized strings are rejected at parse time with
/// a value error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InterpMethod {
    /// Piecewise-linear resampling.
    Linear,
    /// Exact-fit cubic B-spline resampling.
    #[default]
    Spline,
}

impl FromStr for InterpMethod {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(InterpMethod::Linear),
            "spline" => Ok(InterpMethod::Spline),
            other => Err(SpectrumError::UnknownInterpMethod(other.to_string())),
        }
    }
}

impl fmt::Display for InterpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpMethod::Linear => write!(f, "linear"),
            InterpMethod::Spline => write!(f, "spline"),
        }
    }
}

/// Interpolation kind for [`interpolate1d_to`](crate::spectrum::Spectrum::interpolate1d_to).
///
/// `Spline(k)` selects a polynomial spline of order `k`; `Spline(3)` is the
/// cubic case that triggers the instability caution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpKind {
    Linear,
    Nearest,
    /// Polynomial spline of the given order (1..=5).
    Spline(usize),
}

impl InterpKind {
    /// Minimum number of source samples the kind can interpolate from.
    pub fn min_points(self) -> usize {
        match self {
            InterpKind::Linear => 2,
            InterpKind::Nearest => 1,
            InterpKind::Spline(k) => k + 1,
        }
    }
}

impl fmt::Display for InterpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpKind::Linear => write!(f, "linear"),
            InterpKind::Nearest => write!(f, "nearest"),
            InterpKind::Spline(k) => write!(f, "spline(order={k})"),
        }
    }
}

/// What to do when a resample target falls outside the source axis range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfBounds {
    /// Fail the whole call with a value error (checked before any mutation).
    Raise,
    /// Fill out-of-range targets with the given sentinel.
    Fill(f64),
    /// Evaluate the underlying interpolant beyond the data range.
    Extrapolate,
}

impl Default for OutOfBounds {
    fn default() -> Self {
        OutOfBounds::Fill(f64::NAN)
    }
}

/// Continuum estimation method for normalization.
///
/// `Linear`/`Quadratic`/`Cubic` are shorthands for polynomial degrees 1/2/3;
/// `Poly` names the degree explicitly; `Exponential` fits degree 1 in
/// log-flux space and exponentiates back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMethod {
    Scalar,
    Linear,
    Quadratic,
    Cubic,
    Poly(usize),
    Exponential,
}

impl NormalizationMethod {
    /// Polynomial degree of the continuum fit.
    ///
    /// For `Exponential` this is the degree of the log-space fit.
    pub fn degree(self) -> usize {
        match self {
            NormalizationMethod::Scalar => 0,
            NormalizationMethod::Linear | NormalizationMethod::Exponential => 1,
            NormalizationMethod::Quadratic => 2,
            NormalizationMethod::Cubic => 3,
            NormalizationMethod::Poly(degree) => degree,
        }
    }
}

impl FromStr for NormalizationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scalar" => Ok(NormalizationMethod::Scalar),
            "linear" => Ok(NormalizationMethod::Linear),
            "quadratic" => Ok(NormalizationMethod::Quadratic),
            "cubic" => Ok(NormalizationMethod::Cubic),
            "exponential" => Ok(NormalizationMethod::Exponential),
            other => {
                // Accept an explicit degree as "poly:N".
                if let Some(rest) = other.strip_prefix("poly:") {
                    let degree: usize = rest
                        .parse()
                        .map_err(|_| format!("invalid poly degree '{rest}'"))?;
                    return Ok(NormalizationMethod::Poly(degree));
                }
                Err(format!(
                    "unknown normalization method '{other}' (expected scalar, linear, \
                     quadratic, cubic, exponential, or poly:N)"
                ))
            }
        }
    }
}

impl fmt::Display for NormalizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationMethod::Scalar => write!(f, "scalar"),
            NormalizationMethod::Linear => write!(f, "linear"),
            NormalizationMethod::Quadratic => write!(f, "quadratic"),
            NormalizationMethod::Cubic => write!(f, "cubic"),
            NormalizationMethod::Poly(degree) => write!(f, "poly:{degree}"),
            NormalizationMethod::Exponential => write!(f, "exponential"),
        }
    }
}

// ---------------------------------------------------------------------------
// Loosely-typed boundary inputs
// ---------------------------------------------------------------------------

/// A column of samples as it arrives from an external reader.
///
/// Spectral data usually comes out of dynamically typed sources (FITS cards,
/// JSON, CSV cells), where the classic misuse is handing a file *path* to a
/// constructor instead of the loaded samples. Modeling the boundary as this
/// enum keeps that guard: text converts into `SeriesInput` fine, but fails
/// with a type error the moment it is assigned to axis or flux.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesInput {
    Values(Vec<f64>),
    Text(String),
}

impl SeriesInput {
    /// Unwrap into numeric samples, or fail with a type error naming `field`.
    pub fn into_values(self, field: &'static str) -> Result<Vec<f64>, SpectrumError> {
        match self {
            SeriesInput::Values(values) => Ok(values),
            SeriesInput::Text(_) => Err(SpectrumError::TextSeries { field }),
        }
    }
}

impl From<Vec<f64>> for SeriesInput {
    fn from(values: Vec<f64>) -> Self {
        SeriesInput::Values(values)
    }
}

impl From<&[f64]> for SeriesInput {
    fn from(values: &[f64]) -> Self {
        SeriesInput::Values(values.to_vec())
    }
}

impl From<&Vec<f64>> for SeriesInput {
    fn from(values: &Vec<f64>) -> Self {
        SeriesInput::Values(values.clone())
    }
}

impl<const N: usize> From<[f64; N]> for SeriesInput {
    fn from(values: [f64; N]) -> Self {
        SeriesInput::Values(values.to_vec())
    }
}

impl From<String> for SeriesInput {
    fn from(text: String) -> Self {
        SeriesInput::Text(text)
    }
}

impl From<&str> for SeriesInput {
    fn from(text: &str) -> Self {
        SeriesInput::Text(text.to_string())
    }
}

/// A dynamically-typed header value.
///
/// Headers are opaque to the core: values pass through untouched, and the
/// variants only exist so common metadata types survive a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl HeaderValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HeaderValue::Float(v) => Some(*v),
            HeaderValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Text(s) => write!(f, "{s}"),
            HeaderValue::Integer(i) => write!(f, "{i}"),
            HeaderValue::Float(v) => write!(f, "{v}"),
            HeaderValue::Bool(b) => write!(f, "{b}"),
            HeaderValue::Null => write!(f, "<null>"),
        }
    }
}

/// The open string-keyed metadata mapping carried by every spectrum.
pub type Header = BTreeMap<String, HeaderValue>;

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Summary statistics over a spectrum's samples (for reports and demos).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumStats {
    pub n_points: usize,
    pub axis_min: f64,
    pub axis_max: f64,
    pub flux_min: f64,
    pub flux_max: f64,
    pub flux_mean: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interp_method_parses_known_strings() {
        assert_eq!("linear".parse::<InterpMethod>().unwrap(), InterpMethod::Linear);
        assert_eq!("spline".parse::<InterpMethod>().unwrap(), InterpMethod::Spline);
        assert!("cubic".parse::<InterpMethod>().is_err());
    }

    #[test]
    fn interp_method_defaults_to_spline() {
        assert_eq!(InterpMethod::default(), InterpMethod::Spline);
    }

    #[test]
    fn normalization_method_degrees() {
        assert_eq!(NormalizationMethod::Scalar.degree(), 0);
        assert_eq!(NormalizationMethod::Linear.degree(), 1);
        assert_eq!(NormalizationMethod::Quadratic.degree(), 2);
        assert_eq!(NormalizationMethod::Cubic.degree(), 3);
        assert_eq!(NormalizationMethod::Poly(7).degree(), 7);
    }

    #[test]
    fn normalization_method_parses_poly_with_degree() {
        assert_eq!(
            "poly:4".parse::<NormalizationMethod>().unwrap(),
            NormalizationMethod::Poly(4)
        );
        assert!("poly:x".parse::<NormalizationMethod>().is_err());
        assert!("median".parse::<NormalizationMethod>().is_err());
    }

    #[test]
    fn text_series_input_is_rejected_on_unwrap() {
        let input: SeriesInput = "spectrum.fits".into();
        let err = input.into_values("flux").unwrap_err();
        assert!(err.to_string().contains("flux"));
    }

    #[test]
    fn numeric_series_input_passes_through() {
        let input: SeriesInput = vec![1.0, 2.0].into();
        assert_eq!(input.into_values("axis").unwrap(), vec![1.0, 2.0]);
    }
}
