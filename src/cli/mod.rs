//! Command-line parsing for the spectrum demo binary.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the spectrum/math code.

use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::domain::{InterpMethod, NormalizationMethod};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "spectro", version, about = "Astronomical spectrum toolkit demo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a synthetic spectrum, run it through selection,
    /// normalization and a doppler shift, and print per-stage summaries.
    Demo(DemoArgs),
}

/// Options for the demo pipeline.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// Number of samples on the synthetic wavelength grid.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub points: usize,

    /// Wavelength range of the synthetic grid.
    #[arg(long, default_value_t = 2100.0)]
    pub wav_min: f64,
    #[arg(long, default_value_t = 2165.0)]
    pub wav_max: f64,

    /// Signal-to-noise ratio of the generated spectrum (0 disables noise).
    #[arg(long, default_value_t = 150.0)]
    pub snr: f64,

    /// Random seed for line placement and noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Wavelength window selected before normalization.
    #[arg(long)]
    pub select_min: Option<f64>,
    #[arg(long)]
    pub select_max: Option<f64>,

    /// Continuum normalization method
    /// (scalar|linear|quadratic|cubic|exponential|poly:N).
    #[arg(long, default_value = "linear", value_parser = NormalizationMethod::from_str)]
    pub norm: NormalizationMethod,

    /// Radial velocity (km/s) applied as a doppler shift at the end.
    #[arg(long, default_value_t = 15.3)]
    pub rv: f64,

    /// Resampling strategy carried by the generated spectrum.
    #[arg(long, value_enum, default_value_t = InterpMethod::Spline)]
    pub interp: InterpMethod,

    /// Emit the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}
