//! Element-wise power with last-value broadcasting.

use super::traits::BroadcastPower1D;
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use num_traits::Float;

/// Buffer that received a broadcast power result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerTarget {
    /// The bases were longer and got overwritten.
    First,
    /// The exponents were at least as long and got overwritten.
    Second,
}

/// Empty config for [`PowerKernel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerConfig;

/// Trait-first broadcast power kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerKernel;

impl KernelLifecycle for PowerKernel {
    type Config = PowerConfig;

    fn try_new(_: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self)
    }
}

impl<T> BroadcastPower1D<T> for PowerKernel
where
    T: Float,
{
    fn run_in_place<A, B>(
        &self,
        bases: &mut A,
        exponents: &mut B,
    ) -> Result<PowerTarget, ExecInvariantViolation>
    where
        A: Write1D<T> + ?Sized,
        B: Write1D<T> + ?Sized,
    {
        let bases = bases.write_slice_mut()?;
        let exponents = exponents.write_slice_mut()?;
        Ok(broadcast_power(bases, exponents))
    }

    fn run_alloc<A, B>(&self, bases: &A, exponents: &B) -> Result<Vec<T>, ExecInvariantViolation>
    where
        A: Read1D<T> + ?Sized,
        B: Read1D<T> + ?Sized,
    {
        let mut a = bases.read_slice()?.to_vec();
        let mut b = exponents.read_slice()?.to_vec();
        Ok(match broadcast_power(&mut a, &mut b) {
            PowerTarget::First => a,
            PowerTarget::Second => b,
        })
    }
}

/// Compute `a[i]^b[i]` for `i` in `0..max(a.len(), b.len())`, holding the
/// last value of the shorter slice.
///
/// The result overwrites `a` when it is strictly longer than `b`, and `b`
/// otherwise. A slice that is empty contributes its initial held value
/// (base `0`, exponent `1`).
pub fn broadcast_power<T>(a: &mut [T], b: &mut [T]) -> PowerTarget
where
    T: Float,
{
    let (n, m) = (a.len(), b.len());
    let target = if n > m {
        PowerTarget::First
    } else {
        PowerTarget::Second
    };

    let mut base = T::zero();
    let mut exponent = T::one();
    for i in 0..n.max(m) {
        if i < n {
            base = a[i];
        }
        if i < m {
            exponent = b[i];
        }
        let value = base.powf(exponent);
        match target {
            PowerTarget::First => a[i] = value,
            PowerTarget::Second => b[i] = value,
        }
    }
    target
}

/// Broadcast power over double-precision buffers.
///
/// See [`broadcast_power`].
pub fn power(a: &mut [f64], b: &mut [f64]) -> PowerTarget {
    log::trace!("power: {} bases, {} exponents", a.len(), b.len());
    broadcast_power(a, b)
}
