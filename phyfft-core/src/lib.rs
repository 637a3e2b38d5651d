//! Engine-independent numerics for `phyfft`.
//!
//! The transform engine produces and consumes spectra in the packed
//! half-complex layout described in [`halfcomplex`]. Everything that happens
//! *between* a forward and an inverse transform lives here, so it can be
//! tested without an FFT backend.

mod error;
pub mod halfcomplex;

pub use error::{Error, Result};
