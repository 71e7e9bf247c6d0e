//! The `Spectrum` type: construction, accessors, and invariant-preserving
//! setters.
//!
//! The central invariant is that whenever both sequences are present,
//! `axis.len() == flux.len()`. Every mutation in this crate validates the
//! proposed final state of both fields before committing either, so the
//! invariant holds at every observable point and a failed call leaves the
//! spectrum untouched.

use crate::domain::{Header, InterpMethod, SeriesInput, SpectrumStats};
use crate::error::SpectrumError;

/// A one-dimensional astronomical spectrum.
///
/// Owns two equal-length sequences, the independent axis (wavelength when
/// calibrated, pixel index otherwise) and the flux measured at each axis
/// sample, plus a calibration flag, an opaque header mapping, and the
/// resampling strategy used when this spectrum is the left operand of an
/// arithmetic composition.
///
/// There is no unary-plus operation in Rust; where one would be used,
/// [`Clone`] produces the same "new spectrum, everything unchanged" result.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub(super) axis: Option<Vec<f64>>,
    pub(super) flux: Option<Vec<f64>>,
    pub(super) calibrated: bool,
    pub(super) header: Header,
    pub(super) interp_method: InterpMethod,
}

impl Default for Spectrum {
    fn default() -> Self {
        Self::empty()
    }
}

impl Spectrum {
    /// A spectrum with no samples yet.
    ///
    /// Calibration defaults to true: data loaded from reduced observations
    /// normally arrives with a physical wavelength axis.
    pub fn empty() -> Self {
        Spectrum {
            axis: None,
            flux: None,
            calibrated: true,
            header: Header::new(),
            interp_method: InterpMethod::default(),
        }
    }

    /// Construct from explicit flux and axis samples.
    ///
    /// Fails with a type error if either input is text and with a length
    /// error if the sequences disagree; nothing is constructed on failure.
    pub fn new(
        flux: impl Into<SeriesInput>,
        axis: impl Into<SeriesInput>,
    ) -> Result<Self, SpectrumError> {
        let flux = flux.into().into_values("flux")?;
        let axis = axis.into().into_values("axis")?;
        if flux.len() != axis.len() {
            return Err(SpectrumError::LengthMismatch {
                axis: axis.len(),
                flux: flux.len(),
            });
        }
        Ok(Spectrum {
            axis: Some(axis),
            flux: Some(flux),
            ..Self::empty()
        })
    }

    /// Construct from flux alone; the axis becomes the pixel index sequence
    /// `0..len(flux)-1`.
    pub fn from_flux(flux: impl Into<SeriesInput>) -> Result<Self, SpectrumError> {
        let flux = flux.into().into_values("flux")?;
        let axis = index_axis(flux.len());
        Ok(Spectrum {
            axis: Some(axis),
            flux: Some(flux),
            ..Self::empty()
        })
    }

    /// Set the calibration flag at construction time.
    pub fn with_calibrated(mut self, calibrated: bool) -> Self {
        self.calibrated = calibrated;
        self
    }

    /// Attach a header mapping at construction time.
    pub fn with_header(mut self, header: Header) -> Self {
        self.header = header;
        self
    }

    /// Select the resampling strategy at construction time.
    pub fn with_interp_method(mut self, method: InterpMethod) -> Self {
        self.interp_method = method;
        self
    }

    // -- accessors ----------------------------------------------------------

    /// The independent axis, if present.
    pub fn axis(&self) -> Option<&[f64]> {
        self.axis.as_deref()
    }

    /// The flux sequence, if present.
    pub fn flux(&self) -> Option<&[f64]> {
        self.flux.as_deref()
    }

    /// Whether the axis holds physical wavelengths.
    pub fn calibrated(&self) -> bool {
        self.calibrated
    }

    /// The header mapping (never absent; empty when no metadata was given).
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Mutable access to the header mapping.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// The resampling strategy used in arithmetic composition.
    pub fn interp_method(&self) -> InterpMethod {
        self.interp_method
    }

    /// Change the resampling strategy.
    pub fn set_interp_method(&mut self, method: InterpMethod) {
        self.interp_method = method;
    }

    /// Number of flux samples (zero when flux is absent).
    pub fn len(&self) -> usize {
        self.flux.as_ref().map_or(0, Vec::len)
    }

    /// Whether the spectrum holds no flux samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -- setters ------------------------------------------------------------

    /// Replace the flux sequence.
    ///
    /// The new flux must match the stored axis length; replacing both
    /// sequences with a different length goes through [`set_series`].
    /// A failed assignment changes nothing.
    ///
    /// [`set_series`]: Spectrum::set_series
    pub fn set_flux(&mut self, value: impl Into<SeriesInput>) -> Result<(), SpectrumError> {
        let flux = value.into().into_values("flux")?;
        if let Some(axis) = &self.axis {
            if axis.len() != flux.len() {
                return Err(SpectrumError::LengthMismatch {
                    axis: axis.len(),
                    flux: flux.len(),
                });
            }
        }
        self.flux = Some(flux);
        Ok(())
    }

    /// Remove the flux sequence. The axis is left as it is.
    pub fn clear_flux(&mut self) {
        self.flux = None;
    }

    /// Replace the axis.
    ///
    /// The new axis must match the stored flux length. A failed assignment
    /// changes nothing; in particular it never touches the flux.
    pub fn set_axis(&mut self, value: impl Into<SeriesInput>) -> Result<(), SpectrumError> {
        let axis = value.into().into_values("axis")?;
        if let Some(flux) = &self.flux {
            if axis.len() != flux.len() {
                return Err(SpectrumError::LengthMismatch {
                    axis: axis.len(),
                    flux: flux.len(),
                });
            }
        }
        self.axis = Some(axis);
        Ok(())
    }

    /// Drop the explicit axis: re-synthesize the pixel index sequence from
    /// the flux, or clear the axis entirely when flux is absent too.
    pub fn reset_axis(&mut self) {
        self.axis = self.flux.as_ref().map(|flux| index_axis(flux.len()));
    }

    /// Replace flux and axis together, transactionally. The pair is
    /// validated as a whole before either field changes, so a resize never
    /// exposes a transient length mismatch.
    pub fn set_series(
        &mut self,
        flux: impl Into<SeriesInput>,
        axis: impl Into<SeriesInput>,
    ) -> Result<(), SpectrumError> {
        let flux = flux.into().into_values("flux")?;
        let axis = axis.into().into_values("axis")?;
        if flux.len() != axis.len() {
            return Err(SpectrumError::LengthMismatch {
                axis: axis.len(),
                flux: flux.len(),
            });
        }
        self.flux = Some(flux);
        self.axis = Some(axis);
        Ok(())
    }

    /// Override the calibration flag directly.
    ///
    /// This is the escape hatch around the one-way calibration transition
    /// (for example to deliberately recalibrate); normal code should only
    /// ever calibrate through [`calibrate_with`](Spectrum::calibrate_with).
    pub fn force_calibrated(&mut self, calibrated: bool) {
        self.calibrated = calibrated;
    }

    /// Summary statistics over the finite samples, for reports.
    ///
    /// Returns `None` when either sequence is absent or no finite flux
    /// sample exists.
    pub fn stats(&self) -> Option<SpectrumStats> {
        let axis = self.axis.as_ref()?;
        let flux = self.flux.as_ref()?;

        let mut axis_min = f64::INFINITY;
        let mut axis_max = f64::NEG_INFINITY;
        let mut flux_min = f64::INFINITY;
        let mut flux_max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut n_finite = 0usize;

        for (&x, &f) in axis.iter().zip(flux.iter()) {
            if !(x.is_finite() && f.is_finite()) {
                continue;
            }
            axis_min = axis_min.min(x);
            axis_max = axis_max.max(x);
            flux_min = flux_min.min(f);
            flux_max = flux_max.max(f);
            sum += f;
            n_finite += 1;
        }

        if n_finite == 0 {
            return None;
        }

        Some(SpectrumStats {
            n_points: flux.len(),
            axis_min,
            axis_max,
            flux_min,
            flux_max,
            flux_mean: sum / n_finite as f64,
        })
    }
}

/// The synthesized pixel-index axis `0, 1, .., n-1`.
fn index_axis(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HeaderValue;

    #[test]
    fn new_keeps_matched_sequences() {
        let s = Spectrum::new(vec![1.0, 2.0, 3.0], vec![500.0, 501.0, 502.0]).unwrap();
        assert_eq!(s.flux().unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(s.axis().unwrap(), &[500.0, 501.0, 502.0]);
        assert!(s.calibrated());
        assert!(s.header().is_empty());
    }

    #[test]
    fn mismatched_lengths_construct_nothing() {
        let err = Spectrum::new(vec![1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, SpectrumError::LengthMismatch { axis: 3, flux: 2 }));
    }

    #[test]
    fn text_flux_is_a_type_error_at_construction() {
        let err = Spectrum::new("flux.fits", vec![1.0]).unwrap_err();
        assert!(matches!(err, SpectrumError::TextSeries { field: "flux" }));

        let err = Spectrum::new(vec![1.0], "axis.fits").unwrap_err();
        assert!(matches!(err, SpectrumError::TextSeries { field: "axis" }));
    }

    #[test]
    fn from_flux_synthesizes_the_index_axis() {
        let s = Spectrum::from_flux(vec![5.0, 6.0, 7.0, 8.0]).unwrap();
        assert_eq!(s.axis().unwrap(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_spectrum_has_no_sequences_but_a_header() {
        let s = Spectrum::empty();
        assert!(s.axis().is_none());
        assert!(s.flux().is_none());
        assert_eq!(s.len(), 0);
        assert!(s.is_empty());
        assert!(s.header().is_empty());
    }

    #[test]
    fn text_assignment_fails_after_construction_too() {
        let mut s = Spectrum::from_flux(vec![1.0, 2.0]).unwrap();
        let before = s.clone();

        assert!(matches!(
            s.set_flux("data/path.fits"),
            Err(SpectrumError::TextSeries { field: "flux" })
        ));
        assert!(matches!(
            s.set_axis("data/path.fits"),
            Err(SpectrumError::TextSeries { field: "axis" })
        ));
        assert_eq!(s, before, "failed assignments must not change state");
    }

    #[test]
    fn rejected_axis_leaves_flux_untouched() {
        let mut s = Spectrum::new(vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]).unwrap();
        let err = s.set_axis(vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, SpectrumError::LengthMismatch { .. }));
        assert_eq!(s.flux().unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(s.axis().unwrap(), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn mismatched_flux_replacement_needs_set_series() {
        let mut s = Spectrum::from_flux(vec![1.0, 2.0, 3.0]).unwrap();
        assert!(s.set_flux(vec![1.0, 2.0]).is_err());

        s.set_series(vec![9.0, 8.0], vec![100.0, 101.0]).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.axis().unwrap(), &[100.0, 101.0]);
    }

    #[test]
    fn set_series_validates_before_committing_either_field() {
        let mut s = Spectrum::from_flux(vec![1.0, 2.0, 3.0]).unwrap();
        let before = s.clone();
        assert!(s.set_series(vec![1.0, 2.0], vec![1.0, 2.0, 3.0]).is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn reset_axis_resynthesizes_or_clears() {
        let mut s = Spectrum::new(vec![1.0, 2.0], vec![700.0, 701.0]).unwrap();
        s.reset_axis();
        assert_eq!(s.axis().unwrap(), &[0.0, 1.0]);

        let mut empty = Spectrum::empty();
        empty.reset_axis();
        assert!(empty.axis().is_none());
    }

    #[test]
    fn header_round_trips_values_untouched() {
        let mut s = Spectrum::from_flux(vec![1.0]).unwrap();
        s.header_mut()
            .insert("OBJECT".to_string(), HeaderValue::Text("HD 30501".to_string()));
        s.header_mut().insert("EXPTIME".to_string(), HeaderValue::Float(180.0));
        assert_eq!(
            s.header().get("OBJECT"),
            Some(&HeaderValue::Text("HD 30501".to_string()))
        );
        assert_eq!(s.header().get("EXPTIME").and_then(HeaderValue::as_f64), Some(180.0));
    }

    #[test]
    fn stats_ignore_non_finite_samples() {
        let s = Spectrum::new(vec![1.0, f64::NAN, 3.0], vec![10.0, 11.0, 12.0]).unwrap();
        let stats = s.stats().unwrap();
        assert_eq!(stats.n_points, 3);
        assert_eq!(stats.flux_min, 1.0);
        assert_eq!(stats.flux_max, 3.0);
        assert!((stats.flux_mean - 2.0).abs() < 1e-12);
        assert_eq!(stats.axis_max, 12.0);
    }
}
