//! Forward DFT of interleaved complex buffers.

use super::traits::ComplexSpectrum1D;
use crate::engine::{Plan, TransformKind};
use crate::kernel::{
    leading, leading_mut, require_nonzero_len, ConfigError, ExecInvariantViolation,
    KernelLifecycle, Read1D, Write1D,
};
use num_traits::Float;
use rustfft::FftNum;

/// Constructor config for [`ComplexFftKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexFftConfig {
    /// Number of complex points; the buffer holds `2 * n` reals.
    pub n: usize,
}

/// Trait-first complex forward FFT kernel.
///
/// Output is unnormalized: `X[k] = sum_j x[j] * exp(-2 pi i j k / n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexFftKernel {
    n: usize,
    buffer_len: usize,
}

impl ComplexFftKernel {
    /// Number of complex points.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Kernels always have at least one point.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

impl KernelLifecycle for ComplexFftKernel {
    type Config = ComplexFftConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let n = require_nonzero_len("n", config.n)?;
        let buffer_len = TransformKind::ComplexForward.buffer_len(n).ok_or_else(|| {
            log::debug!("rejecting kernel config: {n} complex points overflow the buffer length");
            ConfigError::InvalidArgument {
                arg: "n",
                reason: "interleaved buffer length overflows usize",
            }
        })?;
        Ok(Self { n, buffer_len })
    }
}

impl<T> ComplexSpectrum1D<T> for ComplexFftKernel
where
    T: FftNum + Float,
{
    fn run_in_place<O>(&self, xy: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized,
    {
        let xy = leading_mut(xy, "xy", self.buffer_len)?;
        Plan::new(TransformKind::ComplexForward, self.n)?.execute(xy)
    }

    fn run_alloc<I>(&self, xy: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
    {
        let mut out = leading(xy, "xy", self.buffer_len)?.to_vec();
        Plan::new(TransformKind::ComplexForward, self.n)?.execute(&mut out)?;
        Ok(out)
    }
}

/// In-place forward FFT of `n` interleaved single-precision complex points.
pub fn complex_forward_fft(xy: &mut [f32], n: usize) -> crate::Result<()> {
    log::trace!("complex_forward_fft: n = {n}, buffer = {}", xy.len());
    let kernel = ComplexFftKernel::try_new(ComplexFftConfig { n })?;
    kernel.run_in_place(xy)?;
    Ok(())
}
