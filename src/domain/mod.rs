//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the resampling strategy selectors (`InterpMethod`, `InterpKind`,
//!   `OutOfBounds`)
//! - continuum normalization methods (`NormalizationMethod`)
//! - loosely-typed boundary values (`SeriesInput`, `HeaderValue`)
//! - summary statistics (`SpectrumStats`)

pub mod types;

pub use types::*;
