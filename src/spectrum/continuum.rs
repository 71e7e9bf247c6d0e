//! Continuum fitting and normalization.
//!
//! The continuum is the broad, slowly-varying envelope under a spectrum.
//! Normalization divides the flux by a fitted continuum estimate so that
//! line depths can be compared between observations.
//!
//! Fit failures never raise here: a degenerate fit (constant axis, all-NaN
//! flux, log of a non-positive sample in the exponential method) produces a
//! NaN continuum, which propagates to NaN normalized flux at the affected
//! points. Arithmetic on the result keeps working; the NaNs mark exactly the
//! samples the fit could not explain.

use crate::domain::NormalizationMethod;
use crate::error::SpectrumError;
use crate::math::{polyfit, polyval};
use crate::spectrum::Spectrum;

impl Spectrum {
    /// Fit a continuum over the current `(axis, flux)` pairs and return it
    /// as a new spectrum on the same axis.
    pub fn continuum(&self, method: NormalizationMethod) -> Result<Spectrum, SpectrumError> {
        let axis = self
            .axis
            .as_ref()
            .ok_or(SpectrumError::MissingAxis { op: "fit a continuum to" })?;
        let flux = self
            .flux
            .as_ref()
            .ok_or(SpectrumError::MissingFlux { op: "fit a continuum to" })?;

        let degree = method.degree();
        let fitted = match method {
            NormalizationMethod::Exponential => {
                // Fit in log space, evaluate, exponentiate back.
                let log_flux: Vec<f64> = flux.iter().map(|&f| f.ln()).collect();
                match polyfit(axis, &log_flux, degree) {
                    Some(coeffs) => axis.iter().map(|&x| polyval(&coeffs, x).exp()).collect(),
                    None => vec![f64::NAN; flux.len()],
                }
            }
            _ => match polyfit(axis, flux, degree) {
                Some(coeffs) => axis.iter().map(|&x| polyval(&coeffs, x)).collect(),
                None => vec![f64::NAN; flux.len()],
            },
        };

        Ok(Spectrum {
            axis: Some(axis.clone()),
            flux: Some(fitted),
            calibrated: self.calibrated,
            header: self.header.clone(),
            interp_method: self.interp_method,
        })
    }

    /// A new spectrum whose flux is divided pointwise by the fitted
    /// continuum.
    ///
    /// Zero or NaN continuum values yield NaN in the normalized flux rather
    /// than an error. The result is marked `normalized` in its header.
    pub fn normalize(&self, method: NormalizationMethod) -> Result<Spectrum, SpectrumError> {
        let continuum = self.continuum(method)?;

        let flux = self
            .flux
            .as_ref()
            .ok_or(SpectrumError::MissingFlux { op: "normalize" })?;
        let continuum_flux = continuum
            .flux
            .as_ref()
            .ok_or(SpectrumError::MissingFlux { op: "normalize" })?;

        let normalized: Vec<f64> = flux
            .iter()
            .zip(continuum_flux.iter())
            .map(|(&f, &c)| if c == 0.0 || c.is_nan() { f64::NAN } else { f / c })
            .collect();

        let mut out = Spectrum {
            axis: self.axis.clone(),
            flux: Some(normalized),
            calibrated: self.calibrated,
            header: self.header.clone(),
            interp_method: self.interp_method,
        };
        out.header
            .insert("normalized".to_string(), crate::domain::HeaderValue::Bool(true));
        Ok(out)
    }
}
