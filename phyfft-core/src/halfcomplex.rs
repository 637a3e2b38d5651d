//! Packed half-complex spectra.
//!
//! The DFT of a real sequence of length `n` is conjugate symmetric, so `n`
//! reals are enough to store it. The packed order is
//!
//! ```text
//! index:  0    1    2   ..  n/2  ..  n-2   n-1
//!         r0   r1   r2  ..  r(n/2) .. i2    i1
//! ```
//!
//! where `rk`/`ik` are the real and imaginary parts of bin `k`. Index `n/2`
//! holds the purely real Nyquist bin only when `n` is even; for odd `n` the
//! real and imaginary halves meet without it.

use crate::{Error, Result};
use num_complex::Complex;
use num_traits::Float;

/// Number of one-sided complex bins (`0..=n/2`) for a real sequence of length `n`.
pub fn onesided_len(n: usize) -> usize {
    n / 2 + 1
}

/// Number of bins carrying both a real and an imaginary part.
pub fn interior_bins(n: usize) -> usize {
    n.saturating_sub(1) / 2
}

/// Whether a length-`n` layout has a Nyquist slot at `n / 2`.
pub fn has_nyquist(n: usize) -> bool {
    n > 0 && n % 2 == 0
}

/// Mutable spectral view over a buffer that holds a packed half-complex spectrum.
///
/// The view borrows the same allocation that held the time-domain samples
/// before the forward transform; [`HalfComplex::into_inner`] hands it back for
/// the inverse transform.
#[derive(Debug)]
pub struct HalfComplex<'a, T> {
    data: &'a mut [T],
}

impl<'a, T> HalfComplex<'a, T>
where
    T: Float,
{
    /// Wrap a packed spectrum.
    pub fn new(data: &'a mut [T]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptySpectrum);
        }
        Ok(Self { data })
    }

    /// Length of the underlying real sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; empty spectra are rejected by [`HalfComplex::new`].
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Zero-frequency coefficient.
    pub fn dc(&self) -> T {
        self.data[0]
    }

    /// Nyquist coefficient, present for even lengths only.
    pub fn nyquist(&self) -> Option<T> {
        let n = self.len();
        has_nyquist(n).then(|| self.data[n / 2])
    }

    /// Complex value of bin `k`, for `k` in `0..=n/2`.
    pub fn bin(&self, k: usize) -> Option<Complex<T>> {
        let n = self.len();
        if k == 0 {
            Some(Complex::new(self.dc(), T::zero()))
        } else if k <= interior_bins(n) {
            Some(Complex::new(self.data[k], self.data[n - k]))
        } else if has_nyquist(n) && k == n / 2 {
            Some(Complex::new(self.data[k], T::zero()))
        } else {
            None
        }
    }

    /// Replace this spectrum `X` by `scale * X * conj(Y)`, where `other` holds
    /// `Y` in the same packed layout.
    ///
    /// This is the frequency-domain form of circular cross-correlation. DC and
    /// Nyquist are real, so they reduce to plain products.
    pub fn multiply_conj(&mut self, other: &[T], scale: T) -> Result<()> {
        let n = self.len();
        if other.len() != n {
            return Err(Error::InvalidLength {
                what: "other",
                expected: n,
                got: other.len(),
            });
        }

        self.data[0] = self.dc() * other[0] * scale;
        if let Some(nyquist) = self.nyquist() {
            self.data[n / 2] = nyquist * other[n / 2] * scale;
        }
        for k in 1..=interior_bins(n) {
            if let Some(x) = self.bin(k) {
                let z = x * Complex::new(other[k], other[n - k]).conj() * scale;
                self.data[k] = z.re;
                self.data[n - k] = z.im;
            }
        }
        Ok(())
    }

    /// Replace the spectrum by its power spectrum `|X|^2`.
    ///
    /// The result is real, so every imaginary slot is cleared.
    pub fn power_spectrum(&mut self) {
        let n = self.len();
        self.data[0] = self.dc() * self.dc();
        if let Some(nyquist) = self.nyquist() {
            self.data[n / 2] = nyquist * nyquist;
        }
        for k in 1..=interior_bins(n) {
            if let Some(x) = self.bin(k) {
                self.data[k] = x.norm_sqr();
                self.data[n - k] = T::zero();
            }
        }
    }

    /// Multiply every packed coefficient by `factor`.
    pub fn scale(&mut self, factor: T) {
        for v in self.data.iter_mut() {
            *v = *v * factor;
        }
    }

    /// Give the buffer back, e.g. to run the inverse transform on it.
    pub fn into_inner(self) -> &'a mut [T] {
        self.data
    }
}

/// Pack one-sided complex bins (`0..=n/2`) into the half-complex layout.
///
/// Imaginary parts of DC and Nyquist are dropped; they are zero for the
/// spectrum of any real sequence.
pub fn pack<T>(bins: &[Complex<T>], out: &mut [T]) -> Result<()>
where
    T: Float,
{
    let n = out.len();
    if n == 0 {
        return Err(Error::EmptySpectrum);
    }
    if bins.len() != onesided_len(n) {
        return Err(Error::InvalidLength {
            what: "bins",
            expected: onesided_len(n),
            got: bins.len(),
        });
    }

    out[0] = bins[0].re;
    for k in 1..=interior_bins(n) {
        out[k] = bins[k].re;
        out[n - k] = bins[k].im;
    }
    if has_nyquist(n) {
        out[n / 2] = bins[n / 2].re;
    }
    Ok(())
}

/// Unpack a half-complex layout into one-sided complex bins (`0..=n/2`).
///
/// DC and Nyquist come out with an imaginary part of exactly zero, which is
/// what complex-to-real inverse transforms require.
pub fn unpack<T>(data: &[T], bins: &mut [Complex<T>]) -> Result<()>
where
    T: Float,
{
    let n = data.len();
    if n == 0 {
        return Err(Error::EmptySpectrum);
    }
    if bins.len() != onesided_len(n) {
        return Err(Error::InvalidLength {
            what: "bins",
            expected: onesided_len(n),
            got: bins.len(),
        });
    }

    bins[0] = Complex::new(data[0], T::zero());
    for k in 1..=interior_bins(n) {
        bins[k] = Complex::new(data[k], data[n - k]);
    }
    if has_nyquist(n) {
        bins[n / 2] = Complex::new(data[n / 2], T::zero());
    }
    Ok(())
}
