//! `spectro` library crate.
//!
//! The binary (`spectro`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., pipelines, notebooks, other tools)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod math;
pub mod report;
pub mod spectrum;

pub use error::{ErrorKind, SpectrumError};
pub use spectrum::Spectrum;
