//! FFT-based circular auto- and cross-correlation.
//!
//! Both operations run the correlation theorem on the packed half-complex
//! spectrum: forward real transform, an element-wise product in
//! [`HalfComplex`] form, then the unnormalized inverse transform, all inside
//! the caller's buffer.
//!
//! Normalization follows the host application's conventions:
//!
//! * cross-correlation scales the spectrum by `1 / n^2`, so lag `t` holds
//!   `(1 / n) * sum_l x[(l + t) % n] * y[l]`;
//! * auto-correlation scales the power spectrum by `1 / n` *before* the
//!   inverse transform, so lag `t` holds `sum_l x[(l + t) % n] * x[l]` and
//!   lag 0 is the signal energy.

use super::traits::{AutoCorrelate1D, CrossCorrelate1D};
use crate::engine::{Plan, TransformKind};
use crate::kernel::{
    leading, leading_mut, require_nonzero_len, ConfigError, ExecInvariantViolation,
    KernelLifecycle, Read1D, Write1D,
};
use num_traits::Float;
use phyfft_core::halfcomplex::HalfComplex;
use rustfft::FftNum;

/// Constructor config for the correlation kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelateConfig {
    /// Number of samples per signal, i.e. the circular period.
    pub n: usize,
}

/// Trait-first circular cross-correlation kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossCorrelateKernel {
    n: usize,
}

/// Trait-first circular auto-correlation kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoCorrelateKernel {
    n: usize,
}

impl CrossCorrelateKernel {
    /// Circular period of the kernel.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Kernels always have at least one sample.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

impl AutoCorrelateKernel {
    /// Circular period of the kernel.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Kernels always have at least one sample.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

impl KernelLifecycle for CrossCorrelateKernel {
    type Config = CorrelateConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self {
            n: require_nonzero_len("n", config.n)?,
        })
    }
}

impl KernelLifecycle for AutoCorrelateKernel {
    type Config = CorrelateConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self {
            n: require_nonzero_len("n", config.n)?,
        })
    }
}

fn sample_count<T>(n: usize) -> Result<T, ExecInvariantViolation>
where
    T: FftNum + Float,
{
    T::from_usize(n).ok_or(ExecInvariantViolation::InvalidState {
        reason: "transform length is not representable in the sample type",
    })
}

fn cross_correlate_impl<T>(x: &mut [T], y: &mut [T]) -> Result<(), ExecInvariantViolation>
where
    T: FftNum + Float,
{
    let n = x.len();
    let scale = sample_count::<T>(n)?;
    let scale = T::one() / (scale * scale);

    let forward_x = Plan::new(TransformKind::RealForward, n)?;
    let forward_y = Plan::new(TransformKind::RealForward, n)?;
    forward_x.execute(x)?;
    forward_y.execute(y)?;

    let mut spectrum = HalfComplex::new(x)?;
    spectrum.multiply_conj(y, scale)?;

    let inverse = Plan::new(TransformKind::RealInverse, n)?;
    inverse.execute(spectrum.into_inner())
}

fn auto_correlate_impl<T>(x: &mut [T]) -> Result<(), ExecInvariantViolation>
where
    T: FftNum + Float,
{
    let n = x.len();
    let scale = T::one() / sample_count::<T>(n)?;

    let forward = Plan::new(TransformKind::RealForward, n)?;
    forward.execute(x)?;

    let mut spectrum = HalfComplex::new(x)?;
    spectrum.power_spectrum();

    let inverse = Plan::new(TransformKind::RealInverse, n)?;
    // normalize before the inverse runs
    spectrum.scale(scale);
    inverse.execute(spectrum.into_inner())
}

impl<T> CrossCorrelate1D<T> for CrossCorrelateKernel
where
    T: FftNum + Float,
{
    fn run_in_place<X, Y>(&self, x: &mut X, y: &mut Y) -> Result<(), ExecInvariantViolation>
    where
        X: Write1D<T> + ?Sized,
        Y: Write1D<T> + ?Sized,
    {
        let x = leading_mut(x, "x", self.n)?;
        let y = leading_mut(y, "y", self.n)?;
        cross_correlate_impl(x, y)
    }

    fn run_alloc<X, Y>(&self, x: &X, y: &Y) -> Result<Vec<T>, ExecInvariantViolation>
    where
        X: Read1D<T> + ?Sized,
        Y: Read1D<T> + ?Sized,
    {
        let mut out = leading(x, "x", self.n)?.to_vec();
        let mut spectrum_y = leading(y, "y", self.n)?.to_vec();
        cross_correlate_impl(&mut out, &mut spectrum_y)?;
        Ok(out)
    }
}

impl<T> AutoCorrelate1D<T> for AutoCorrelateKernel
where
    T: FftNum + Float,
{
    fn run_in_place<X>(&self, x: &mut X) -> Result<(), ExecInvariantViolation>
    where
        X: Write1D<T> + ?Sized,
    {
        auto_correlate_impl(leading_mut(x, "x", self.n)?)
    }

    fn run_alloc<X>(&self, x: &X) -> Result<Vec<T>, ExecInvariantViolation>
    where
        X: Read1D<T> + ?Sized,
    {
        let mut out = leading(x, "x", self.n)?.to_vec();
        auto_correlate_impl(&mut out)?;
        Ok(out)
    }
}

/// Circular cross-correlation of the first `n` samples of `x` and `y`,
/// written into `x`.
///
/// Both buffers must hold at least `n` samples; anything past the first `n`
/// is neither read nor written. Afterwards the first `n` samples of `y` hold
/// its half-complex spectrum rather than its original samples.
pub fn cross_correlate(x: &mut [f32], y: &mut [f32], n: usize) -> crate::Result<()> {
    log::trace!("cross_correlate: n = {n}");
    let kernel = CrossCorrelateKernel::try_new(CorrelateConfig { n })?;
    kernel.run_in_place(x, y)?;
    Ok(())
}

/// Circular auto-correlation of the first `n` samples of `x`, in place.
pub fn auto_correlate(x: &mut [f32], n: usize) -> crate::Result<()> {
    log::trace!("auto_correlate: n = {n}");
    let kernel = AutoCorrelateKernel::try_new(CorrelateConfig { n })?;
    kernel.run_in_place(x)?;
    Ok(())
}
