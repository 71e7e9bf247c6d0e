//! Wavelength calibration, doppler shifting, and noise addition.

use log::warn;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::SpectrumError;
use crate::math::polyval;
use crate::spectrum::Spectrum;

/// Speed of light in km/s, matching the doppler relation `Δλ/λ = RV/c`.
pub const SPEED_OF_LIGHT_KMS: f64 = 299_792.458;

/// Radial velocities below this magnitude (0.1 mm/s) are treated as noise:
/// the implied wavelength shift is far below any real wavelength accuracy.
const MIN_RV_KMS: f64 = 1e-7;

impl Spectrum {
    /// Calibrate the axis with a wavelength-solution polynomial.
    ///
    /// `wl_map` holds the coefficients highest degree first, as produced by
    /// a polynomial fit of pixel position against known line wavelengths.
    /// Calibration is a one-way transition: an already-calibrated spectrum
    /// fails with a domain error (the escape hatch is
    /// [`force_calibrated`](Spectrum::force_calibrated)), and a solution
    /// that produces any zero or negative wavelength fails the same way;
    /// such an axis could never be doppler shifted. On failure both the
    /// axis and the calibration flag keep their previous values.
    pub fn calibrate_with(&mut self, wl_map: &[f64]) -> Result<(), SpectrumError> {
        if self.calibrated {
            return Err(SpectrumError::AlreadyCalibrated);
        }
        let axis = self
            .axis
            .as_ref()
            .ok_or(SpectrumError::MissingAxis { op: "calibrate" })?;

        let wavelength: Vec<f64> = axis.iter().map(|&x| polyval(wl_map, x)).collect();
        if wavelength.iter().any(|&w| w <= 0.0) {
            return Err(SpectrumError::NonPositiveWavelength);
        }

        self.axis = Some(wavelength);
        self.calibrated = true;
        Ok(())
    }

    /// Doppler shift the wavelength axis by a radial velocity in km/s.
    ///
    /// Applies `λ → λ(1 + RV/c)` in place. This operation never fails:
    /// every condition that would make the shift meaningless degrades to a
    /// no-op, with a logged warning for everything except an exactly-zero
    /// velocity.
    pub fn doppler_shift(&mut self, rv_kms: f64) {
        if rv_kms == 0.0 {
            return;
        }
        if rv_kms.abs() < MIN_RV_KMS {
            warn!("RV {rv_kms} km/s is below 0.1 mm/s; not performing the doppler shift");
            return;
        }
        if rv_kms.is_nan() || rv_kms.is_infinite() {
            warn!("RV is NaN or infinite; not performing the doppler shift");
            return;
        }
        if !self.calibrated {
            warn!("axis is not wavelength calibrated; cannot perform the doppler shift");
            return;
        }
        let Some(axis) = self.axis.as_mut() else {
            warn!("spectrum has no wavelength axis; cannot perform the doppler shift");
            return;
        };

        let factor = rv_kms / SPEED_OF_LIGHT_KMS;
        for x in axis.iter_mut() {
            *x += *x * factor;
        }
    }

    /// Add Gaussian noise at the given signal-to-noise ratio, in place.
    ///
    /// Each sample receives zero-mean noise with sigma `flux/snr`. The RNG
    /// is caller-supplied so noisy fixtures stay reproducible under a fixed
    /// seed.
    pub fn add_noise<R: Rng>(&mut self, snr: f64, rng: &mut R) -> Result<(), SpectrumError> {
        let flux = self
            .flux
            .as_mut()
            .ok_or(SpectrumError::MissingFlux { op: "add noise to" })?;

        for f in flux.iter_mut() {
            let sigma = *f / snr;
            let z: f64 = rng.sample(StandardNormal);
            *f += sigma * z;
        }
        Ok(())
    }
}
