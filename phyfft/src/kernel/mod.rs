//! Shared kernel substrate.
//!
//! Every operation in this crate is a small kernel struct: it is built from a
//! config through [`KernelLifecycle::try_new`], which rejects bad parameters
//! up front, and then run against borrowed buffers via the [`Read1D`] and
//! [`Write1D`] adapters.

mod errors;
mod io;
mod lifecycle;

pub use errors::*;
pub use io::*;
pub use lifecycle::*;
