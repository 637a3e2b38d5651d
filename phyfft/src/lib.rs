//! # phyfft
//!
//! Small numeric primitives for measurement buffers:
//!
//! * [`power`]: element-wise `base^exponent` with last-value broadcasting,
//! * [`complex_forward_fft`]: in-place forward DFT of interleaved complex data,
//! * [`cross_correlate`] / [`auto_correlate`]: FFT-based circular correlation
//!   computed through the packed half-complex spectrum.
//!
//! Every call is self-contained: transform plans are created and dropped
//! inside the call, and results are written back into the caller's buffers.
//!
//! ```
//! let mut x = [1.0f32, 2.0, 3.0, 4.0];
//! phyfft::auto_correlate(&mut x, 4).unwrap();
//! assert!((x[0] - 30.0).abs() < 1e-4);
//! ```

#![warn(missing_docs)]

pub mod engine;
mod error;
pub mod kernel;
pub mod signal;

pub use error::*;
pub use phyfft_core::halfcomplex;
pub use signal::{auto_correlate, complex_forward_fft, cross_correlate, power};
