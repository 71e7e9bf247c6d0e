//! Sample selection: wavelength windowing, NaN removal, and indexing.
//!
//! Every operation here filters axis and flux in lock-step; the paired
//! sequences are materialized completely before the spectrum is touched, so
//! a failure (or an empty result) never leaves a half-updated state.

use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};

use log::warn;

use crate::error::SpectrumError;
use crate::spectrum::Spectrum;

/// An index form accepted by [`Spectrum::take`].
///
/// Single positions, position lists, and ranges all select pairs. The
/// `Bool` and `Float` cases exist only to be rejected: both convert into an
/// `IndexArg` so the misuse reaches the call, where it fails with a value
/// error. This is a deliberate guard: some dynamically typed environments
/// silently accept booleans and floats as indices, and the results are
/// never what the caller meant.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexArg {
    Single(usize),
    List(Vec<usize>),
    Span(Range<usize>),
    SpanFrom(usize),
    SpanTo(usize),
    Full,
    Bool(bool),
    Float(f64),
}

impl From<usize> for IndexArg {
    fn from(i: usize) -> Self {
        IndexArg::Single(i)
    }
}

impl From<Vec<usize>> for IndexArg {
    fn from(list: Vec<usize>) -> Self {
        IndexArg::List(list)
    }
}

impl From<&[usize]> for IndexArg {
    fn from(list: &[usize]) -> Self {
        IndexArg::List(list.to_vec())
    }
}

impl From<Range<usize>> for IndexArg {
    fn from(range: Range<usize>) -> Self {
        IndexArg::Span(range)
    }
}

impl From<RangeInclusive<usize>> for IndexArg {
    fn from(range: RangeInclusive<usize>) -> Self {
        IndexArg::Span(*range.start()..range.end() + 1)
    }
}

impl From<RangeFrom<usize>> for IndexArg {
    fn from(range: RangeFrom<usize>) -> Self {
        IndexArg::SpanFrom(range.start)
    }
}

impl From<RangeTo<usize>> for IndexArg {
    fn from(range: RangeTo<usize>) -> Self {
        IndexArg::SpanTo(range.end)
    }
}

impl From<RangeFull> for IndexArg {
    fn from(_: RangeFull) -> Self {
        IndexArg::Full
    }
}

impl From<bool> for IndexArg {
    fn from(b: bool) -> Self {
        IndexArg::Bool(b)
    }
}

impl From<f64> for IndexArg {
    fn from(v: f64) -> Self {
        IndexArg::Float(v)
    }
}

impl Spectrum {
    /// Keep only the samples whose axis value lies strictly between
    /// `wav_min` and `wav_max` (both ends exclusive). Operates in place.
    ///
    /// An absent axis or flux is a type error and changes nothing. A present
    /// but empty axis logs a warning and no-ops; an empty selection window
    /// is suspicious but not wrong.
    pub fn wav_select(&mut self, wav_min: f64, wav_max: f64) -> Result<(), SpectrumError> {
        let axis = self
            .axis
            .as_ref()
            .ok_or(SpectrumError::MissingAxis { op: "select wavelengths from" })?;
        let flux = self
            .flux
            .as_ref()
            .ok_or(SpectrumError::MissingFlux { op: "select wavelengths from" })?;

        if axis.is_empty() {
            warn!("spectrum has an empty axis to select wavelengths from");
            return Ok(());
        }

        let mut new_axis = Vec::new();
        let mut new_flux = Vec::new();
        for (&x, &f) in axis.iter().zip(flux.iter()) {
            if x > wav_min && x < wav_max {
                new_axis.push(x);
                new_flux.push(f);
            }
        }

        self.flux = Some(new_flux);
        self.axis = Some(new_axis);
        Ok(())
    }

    /// A new spectrum keeping only the positions where flux is not NaN,
    /// with the axis filtered identically.
    pub fn remove_nans(&self) -> Result<Spectrum, SpectrumError> {
        let axis = self
            .axis
            .as_ref()
            .ok_or(SpectrumError::MissingAxis { op: "remove NaNs from" })?;
        let flux = self
            .flux
            .as_ref()
            .ok_or(SpectrumError::MissingFlux { op: "remove NaNs from" })?;

        let mut new_axis = Vec::new();
        let mut new_flux = Vec::new();
        for (&x, &f) in axis.iter().zip(flux.iter()) {
            if !f.is_nan() {
                new_axis.push(x);
                new_flux.push(f);
            }
        }

        Ok(Spectrum {
            axis: Some(new_axis),
            flux: Some(new_flux),
            calibrated: self.calibrated,
            header: self.header.clone(),
            interp_method: self.interp_method,
        })
    }

    /// A new spectrum holding the selected axis/flux pairs.
    ///
    /// Accepts a single position, a list of positions, or a range; header,
    /// calibration flag, and interp method carry over unchanged. Boolean and
    /// float "indices" are rejected with a value error, and positions beyond
    /// the end are value errors as well.
    pub fn take(&self, index: impl Into<IndexArg>) -> Result<Spectrum, SpectrumError> {
        let axis = self
            .axis
            .as_ref()
            .ok_or(SpectrumError::MissingAxis { op: "index" })?;
        let flux = self
            .flux
            .as_ref()
            .ok_or(SpectrumError::MissingFlux { op: "index" })?;
        let len = flux.len();

        // Ranges clamp at the end like sequence slices; explicit positions
        // beyond the end are errors.
        let positions: Vec<usize> = match index.into() {
            IndexArg::Bool(_) => return Err(SpectrumError::UnsupportedIndex("boolean")),
            IndexArg::Float(_) => return Err(SpectrumError::UnsupportedIndex("float")),
            IndexArg::Single(i) => vec![i],
            IndexArg::List(list) => list,
            IndexArg::Span(range) => (range.start..range.end.min(len)).collect(),
            IndexArg::SpanFrom(start) => (start..len).collect(),
            IndexArg::SpanTo(end) => (0..end.min(len)).collect(),
            IndexArg::Full => (0..len).collect(),
        };

        let mut new_axis = Vec::with_capacity(positions.len());
        let mut new_flux = Vec::with_capacity(positions.len());
        for &i in &positions {
            if i >= len {
                return Err(SpectrumError::IndexOutOfRange { index: i, len });
            }
            new_axis.push(axis[i]);
            new_flux.push(flux[i]);
        }

        Ok(Spectrum {
            axis: Some(new_axis),
            flux: Some(new_flux),
            calibrated: self.calibrated,
            header: self.header.clone(),
            interp_method: self.interp_method,
        })
    }
}
