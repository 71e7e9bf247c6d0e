//! Synthetic spectrum generation.
//!
//! Produces a continuum-shaped flux with Gaussian absorption lines over a
//! linear wavelength grid, optionally degraded to a target signal-to-noise.
//! Everything is driven by a seeded RNG so a given configuration always
//! yields the same spectrum, so demos and tests stay reproducible.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::error::SpectrumError;
use crate::spectrum::Spectrum;

/// Configuration for [`generate_spectrum`].
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// Number of samples on the wavelength grid.
    pub n_points: usize,
    /// Wavelength range (same units the axis will carry, e.g. nm).
    pub wav_min: f64,
    pub wav_max: f64,
    /// Continuum level at `wav_min` and its slope per wavelength unit.
    pub continuum_level: f64,
    pub continuum_slope: f64,
    /// Number of absorption lines scattered over the range.
    pub n_lines: usize,
    /// Maximum fractional line depth (0..1) and Gaussian sigma in axis units.
    pub line_depth: f64,
    pub line_width: f64,
    /// Optional signal-to-noise ratio; `None` leaves the spectrum noiseless.
    pub snr: Option<f64>,
    /// RNG seed for line placement and noise.
    pub seed: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        SynthConfig {
            n_points: 200,
            wav_min: 2100.0,
            wav_max: 2165.0,
            continuum_level: 1.0,
            continuum_slope: 0.002,
            n_lines: 12,
            line_depth: 0.6,
            line_width: 0.35,
            snr: Some(150.0),
            seed: 42,
        }
    }
}

/// Generate a synthetic spectrum from the configuration.
///
/// The result is uncalibrated-flag **true** with the wavelength grid as
/// axis, ready for selection/normalization/arithmetic demos.
pub fn generate_spectrum(config: &SynthConfig) -> Result<Spectrum, SpectrumError> {
    if config.n_points < 2 {
        return Err(SpectrumError::TooFewPoints {
            needed: 2,
            got: config.n_points,
        });
    }
    if !(config.wav_min.is_finite() && config.wav_max.is_finite())
        || config.wav_max <= config.wav_min
    {
        return Err(SpectrumError::AxisNotAscending);
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let n = config.n_points;

    let axis: Vec<f64> = (0..n)
        .map(|i| {
            config.wav_min + (config.wav_max - config.wav_min) * i as f64 / (n as f64 - 1.0)
        })
        .collect();

    // Random line list: center, fractional depth, width.
    let lines: Vec<(f64, f64, f64)> = (0..config.n_lines)
        .map(|_| {
            let center = rng.gen_range(config.wav_min..=config.wav_max);
            let depth = rng.gen_range(0.1..=config.line_depth.max(0.1));
            let width = config.line_width * rng.gen_range(0.6..=1.4);
            (center, depth, width)
        })
        .collect();

    let flux: Vec<f64> = axis
        .iter()
        .map(|&x| {
            let continuum =
                config.continuum_level + config.continuum_slope * (x - config.wav_min);
            let absorbed: f64 = lines
                .iter()
                .map(|&(center, depth, width)| {
                    let z = (x - center) / width;
                    depth * (-0.5 * z * z).exp()
                })
                .sum();
            // Clamp so overlapping lines never drive the flux negative.
            continuum * (1.0 - absorbed.min(0.95))
        })
        .collect();

    let mut spectrum = Spectrum::new(flux, axis)?;
    if let Some(snr) = config.snr {
        spectrum.add_noise(snr, &mut rng)?;
    }
    Ok(spectrum)
}
