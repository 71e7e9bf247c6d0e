//! Reporting utilities: formatted terminal output and the JSON report.
//!
//! We keep formatting code in one place so:
//! - the spectrum operations stay clean and testable
//! - output changes are localized

pub mod format;

pub use format::*;
