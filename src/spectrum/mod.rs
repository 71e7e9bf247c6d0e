//! The spectrum value object and its operations.
//!
//! One type, [`Spectrum`], owns a paired axis/flux sequence plus calibration
//! state, header metadata, and a resampling strategy selector. The
//! submodules split its behavior by concern:
//!
//! - [`model`]: construction, accessors, and the transactional setters that
//!   keep axis and flux length-consistent
//! - [`select`]: wavelength windowing, NaN removal, and indexing
//! - [`calibrate`]: wavelength calibration, doppler shifting, noise
//! - [`resample`]: interpolation of the flux onto a new axis
//! - [`arith`]: elementwise composition of spectra and scalars/arrays
//! - [`continuum`]: continuum fitting and normalization

pub mod arith;
pub mod calibrate;
pub mod continuum;
pub mod model;
pub mod resample;
pub mod select;

pub use arith::Operand;
pub use model::Spectrum;
pub use resample::{ResampleTarget, SplineOptions};
pub use select::IndexArg;
