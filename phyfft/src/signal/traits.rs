//! Trait interfaces for the in-place signal operations.
//!
//! Each capability has a `run_in_place` entrypoint that rewrites caller
//! buffers, mirroring the host application's calling convention, and where it
//! makes sense a `run_alloc` entrypoint that leaves the inputs untouched.

use super::power::PowerTarget;
use crate::kernel::{ExecInvariantViolation, Read1D, Write1D};

/// Element-wise power with last-value broadcasting.
pub trait BroadcastPower1D<T> {
    /// Write `base^exponent` into the longer of `bases` / `exponents`.
    fn run_in_place<A, B>(
        &self,
        bases: &mut A,
        exponents: &mut B,
    ) -> Result<PowerTarget, ExecInvariantViolation>
    where
        A: Write1D<T> + ?Sized,
        B: Write1D<T> + ?Sized;

    /// Compute the broadcast power into a new buffer.
    fn run_alloc<A, B>(&self, bases: &A, exponents: &B) -> Result<Vec<T>, ExecInvariantViolation>
    where
        A: Read1D<T> + ?Sized,
        B: Read1D<T> + ?Sized;
}

/// Forward DFT of an interleaved complex buffer.
pub trait ComplexSpectrum1D<T> {
    /// Transform the leading `2n` reals of `xy` in place.
    fn run_in_place<O>(&self, xy: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized;

    /// Transform a copy of the leading `2n` reals of `xy`.
    fn run_alloc<I>(&self, xy: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// Circular cross-correlation of two real buffers.
///
/// Like every kernel here, only the leading `n` samples of each buffer take
/// part; both buffers must hold at least `n` samples but may differ in length.
pub trait CrossCorrelate1D<T> {
    /// Correlate into `x`. On success `y` holds its half-complex spectrum.
    fn run_in_place<X, Y>(&self, x: &mut X, y: &mut Y) -> Result<(), ExecInvariantViolation>
    where
        X: Write1D<T> + ?Sized,
        Y: Write1D<T> + ?Sized;

    /// Correlate copies of `x` and `y`.
    fn run_alloc<X, Y>(&self, x: &X, y: &Y) -> Result<Vec<T>, ExecInvariantViolation>
    where
        X: Read1D<T> + ?Sized,
        Y: Read1D<T> + ?Sized;
}

/// Circular auto-correlation of a real buffer.
pub trait AutoCorrelate1D<T> {
    /// Auto-correlate `x` in place.
    fn run_in_place<X>(&self, x: &mut X) -> Result<(), ExecInvariantViolation>
    where
        X: Write1D<T> + ?Sized;

    /// Auto-correlate a copy of `x`.
    fn run_alloc<X>(&self, x: &X) -> Result<Vec<T>, ExecInvariantViolation>
    where
        X: Read1D<T> + ?Sized;
}
