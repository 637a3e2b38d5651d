//! Per-call transform plans over `rustfft` / `realfft`.
//!
//! A `Plan` binds a transform kind to a length. Operations build the plans
//! they need, execute them against their borrowed buffers and drop them before
//! returning; nothing is cached between calls. Real transforms read and write
//! the packed half-complex layout from [`phyfft_core::halfcomplex`], and all
//! transforms are unnormalized.

use crate::kernel::ExecInvariantViolation;
use core::fmt;
use num_traits::Float;
use phyfft_core::halfcomplex;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftNum, FftPlanner};
use std::sync::Arc;

/// Transform kinds the engine can plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Real samples to packed half-complex spectrum.
    RealForward,
    /// Packed half-complex spectrum back to real samples.
    RealInverse,
    /// Forward DFT of interleaved `(re, im)` pairs.
    ComplexForward,
}

impl TransformKind {
    /// Number of reals a buffer must hold for an `n`-point transform, or
    /// `None` when that count does not fit in `usize`.
    pub fn buffer_len(self, n: usize) -> Option<usize> {
        match self {
            TransformKind::ComplexForward => n.checked_mul(2),
            TransformKind::RealForward | TransformKind::RealInverse => Some(n),
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformKind::RealForward => write!(f, "real to half-complex"),
            TransformKind::RealInverse => write!(f, "half-complex to real"),
            TransformKind::ComplexForward => write!(f, "complex forward"),
        }
    }
}

enum Backend<T: FftNum> {
    RealForward(Arc<dyn RealToComplex<T>>),
    RealInverse(Arc<dyn ComplexToReal<T>>),
    ComplexForward(Arc<dyn Fft<T>>),
}

/// A single-use transform plan.
pub(crate) struct Plan<T: FftNum> {
    kind: TransformKind,
    n: usize,
    buffer_len: usize,
    backend: Backend<T>,
}

impl<T> Plan<T>
where
    T: FftNum + Float,
{
    /// Plan an `n`-point transform of the given kind.
    pub(crate) fn new(kind: TransformKind, n: usize) -> Result<Self, ExecInvariantViolation> {
        if n == 0 {
            return Err(ExecInvariantViolation::TransformEngine {
                kind,
                reason: "cannot plan a zero-length transform".into(),
            });
        }
        let buffer_len = kind.buffer_len(n).ok_or_else(|| {
            ExecInvariantViolation::TransformEngine {
                kind,
                reason: format!("{n} points overflow the buffer length"),
            }
        })?;
        let backend = match kind {
            TransformKind::RealForward => {
                Backend::RealForward(RealFftPlanner::<T>::new().plan_fft_forward(n))
            }
            TransformKind::RealInverse => {
                Backend::RealInverse(RealFftPlanner::<T>::new().plan_fft_inverse(n))
            }
            TransformKind::ComplexForward => {
                Backend::ComplexForward(FftPlanner::<T>::new().plan_fft_forward(n))
            }
        };
        log::trace!("planned {kind} transform, n = {n}");
        Ok(Self {
            kind,
            n,
            buffer_len,
            backend,
        })
    }

    /// Transform kind.
    pub(crate) fn kind(&self) -> TransformKind {
        self.kind
    }

    /// Number of transform points.
    pub(crate) fn len(&self) -> usize {
        self.n
    }

    /// Run the transform in place on `buf`, which must hold exactly
    /// [`TransformKind::buffer_len`] reals.
    pub(crate) fn execute(&self, buf: &mut [T]) -> Result<(), ExecInvariantViolation> {
        let expected = self.buffer_len;
        if buf.len() != expected {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "buffer",
                expected,
                got: buf.len(),
            });
        }

        match &self.backend {
            Backend::RealForward(fft) => {
                // realfft uses its input as scratch
                let mut input = buf.to_vec();
                let mut bins = fft.make_output_vec();
                fft.process(&mut input, &mut bins)
                    .map_err(|e| self.failure(e))?;
                halfcomplex::pack(&bins, buf)?;
            }
            Backend::RealInverse(fft) => {
                let mut bins = fft.make_input_vec();
                halfcomplex::unpack(buf, &mut bins)?;
                fft.process(&mut bins, buf).map_err(|e| self.failure(e))?;
            }
            Backend::ComplexForward(fft) => {
                let mut points: Vec<Complex<T>> = buf
                    .chunks_exact(2)
                    .map(|pair| Complex::new(pair[0], pair[1]))
                    .collect();
                fft.process(&mut points);
                for (pair, z) in buf.chunks_exact_mut(2).zip(points) {
                    pair[0] = z.re;
                    pair[1] = z.im;
                }
            }
        }
        Ok(())
    }

    fn failure(&self, err: impl fmt::Display) -> ExecInvariantViolation {
        log::warn!("{} transform of {} points failed: {err}", self.kind(), self.len());
        ExecInvariantViolation::TransformEngine {
            kind: self.kind(),
            reason: err.to_string(),
        }
    }
}

impl<T: FftNum + Float> fmt::Debug for Plan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("kind", &self.kind())
            .field("n", &self.len())
            .finish_non_exhaustive()
    }
}

impl<T: FftNum> Drop for Plan<T> {
    fn drop(&mut self) {
        log::trace!("destroyed {} plan, n = {}", self.kind, self.n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn naive_dft(x: &[f64]) -> Vec<Complex<f64>> {
        let n = x.len();
        (0..n)
            .map(|k| {
                x.iter().enumerate().fold(Complex::new(0.0, 0.0), |acc, (j, &v)| {
                    let phase = -2.0 * core::f64::consts::PI * (j * k) as f64 / n as f64;
                    acc + Complex::from_polar(v, phase)
                })
            })
            .collect()
    }

    #[test]
    fn real_forward_writes_half_complex_layout() {
        let plan = Plan::<f64>::new(TransformKind::RealForward, 4).expect("plan");
        let mut x = [1.0, 2.0, 3.0, 4.0];
        plan.execute(&mut x).expect("execute");
        for (got, want) in x.iter().zip([10.0, -2.0, -2.0, 2.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn real_forward_matches_naive_dft_for_odd_length() {
        let signal = [0.3, -1.2, 2.5, 0.7, -0.4, 1.1, 0.9];
        let n = signal.len();
        let reference = naive_dft(&signal);

        let mut x = signal;
        Plan::<f64>::new(TransformKind::RealForward, n)
            .expect("plan")
            .execute(&mut x)
            .expect("execute");

        assert_abs_diff_eq!(x[0], reference[0].re, epsilon = 1e-12);
        for k in 1..=(n - 1) / 2 {
            assert_abs_diff_eq!(x[k], reference[k].re, epsilon = 1e-12);
            assert_abs_diff_eq!(x[n - k], reference[k].im, epsilon = 1e-12);
        }
    }

    #[test]
    fn real_inverse_is_unnormalized() {
        let mut x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let original = x;
        Plan::<f64>::new(TransformKind::RealForward, 6)
            .expect("plan")
            .execute(&mut x)
            .expect("forward");
        Plan::<f64>::new(TransformKind::RealInverse, 6)
            .expect("plan")
            .execute(&mut x)
            .expect("inverse");
        for (got, want) in x.iter().zip(original) {
            assert_abs_diff_eq!(*got, 6.0 * want, epsilon = 1e-9);
        }
    }

    #[test]
    fn complex_forward_transforms_interleaved_pairs() {
        // x = [1 + 0i, 0 + 1i]  ->  X = [1 + 1i, 1 - 1i]
        let mut xy = [1.0f32, 0.0, 0.0, 1.0];
        let plan = Plan::<f32>::new(TransformKind::ComplexForward, 2).expect("plan");
        plan.execute(&mut xy).expect("execute");
        assert_abs_diff_eq!(xy[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(xy[1], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(xy[2], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(xy[3], -1.0, epsilon = 1e-6);
    }

    #[test]
    fn complex_buffer_len_overflow_is_reported() {
        assert_eq!(TransformKind::ComplexForward.buffer_len(3), Some(6));
        assert_eq!(TransformKind::RealInverse.buffer_len(usize::MAX), Some(usize::MAX));
        assert_eq!(TransformKind::ComplexForward.buffer_len(usize::MAX / 2 + 1), None);

        let err = Plan::<f32>::new(TransformKind::ComplexForward, usize::MAX / 2 + 1)
            .expect_err("overflowing length");
        assert!(matches!(
            err,
            ExecInvariantViolation::TransformEngine {
                kind: TransformKind::ComplexForward,
                ..
            }
        ));
    }

    #[test]
    fn plan_rejects_zero_length_and_wrong_buffer() {
        let err = Plan::<f32>::new(TransformKind::RealForward, 0).expect_err("zero length");
        assert!(matches!(
            err,
            ExecInvariantViolation::TransformEngine {
                kind: TransformKind::RealForward,
                ..
            }
        ));

        let plan = Plan::<f32>::new(TransformKind::ComplexForward, 4).expect("plan");
        assert_eq!(plan.len(), 4);
        assert_eq!(plan.kind(), TransformKind::ComplexForward);
        let mut short = [0.0f32; 4];
        assert_eq!(
            plan.execute(&mut short),
            Err(ExecInvariantViolation::LengthMismatch {
                arg: "buffer",
                expected: 8,
                got: 4
            })
        );
    }
}
