//! Numeric routines consumed by the spectrum operations: polynomial
//! evaluation/fitting, 1-D interpolation, and exact-fit B-splines.

pub mod bspline;
pub mod interp;
pub mod poly;

pub use bspline::*;
pub use interp::*;
pub use poly::*;
