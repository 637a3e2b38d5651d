//! Convenience wrappers used by measurement pipelines.
//!
//! These take plain input buffers, build the scratch buffers the in-place
//! operations expect and copy the interesting part of the result back out.

use super::correlate::cross_correlate;
use super::spectrum::complex_forward_fft;
use crate::{Error, Result};

/// Forward FFT of a complex signal given as separate real and imaginary parts.
///
/// `im` may be absent or shorter than `re`; missing imaginary parts are zero.
/// Returns the real and imaginary parts of the unnormalized spectrum.
pub fn complex_spectrum(re: &[f32], im: Option<&[f32]>) -> Result<(Vec<f32>, Vec<f32>)> {
    let n = re.len();
    if n < 2 {
        return Err(Error::InvalidArgument {
            arg: "re".into(),
            reason: format!("need at least 2 samples, got {n}"),
        });
    }

    let im = im.unwrap_or(&[]);
    let mut xy = vec![0.0f32; 2 * n];
    for (i, pair) in xy.chunks_exact_mut(2).enumerate() {
        pair[0] = re[i];
        pair[1] = im.get(i).copied().unwrap_or(0.0);
    }

    complex_forward_fft(&mut xy, n)?;

    Ok(xy.chunks_exact(2).map(|pair| (pair[0], pair[1])).unzip())
}

/// Slide the shorter of two signals along the longer one.
///
/// Both signals are zero-padded to `2 * (a.len() + b.len())` so the circular
/// correlation does not wrap, the longer one (`b` on a tie) taking the place
/// of `x` in [`cross_correlate`]. The first `|a.len() - b.len()|` lags are
/// returned; signals of equal length therefore produce an empty result.
/// Values carry the `1 / padded_len` normalization of [`cross_correlate`].
pub fn sliding_cross_correlation(a: &[f32], b: &[f32]) -> Result<Vec<f32>> {
    if a.is_empty() || b.is_empty() {
        return Err(Error::InvalidArgument {
            arg: if a.is_empty() { "a" } else { "b" }.into(),
            reason: "cannot correlate an empty signal".into(),
        });
    }

    let size = 2 * (a.len() + b.len());
    let (longer, shorter) = if a.len() > b.len() { (a, b) } else { (b, a) };
    let mut x = vec![0.0f32; size];
    let mut y = vec![0.0f32; size];
    x[..longer.len()].copy_from_slice(longer);
    y[..shorter.len()].copy_from_slice(shorter);

    cross_correlate(&mut x, &mut y, size)?;

    x.truncate(a.len().abs_diff(b.len()));
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn complex_spectrum_of_real_input() {
        let (re, im) = complex_spectrum(&[1.0, 2.0, 3.0, 4.0], None).expect("valid input");
        let want_re = [10.0, -2.0, -2.0, -2.0];
        let want_im = [0.0, 2.0, 0.0, -2.0];
        for k in 0..4 {
            assert_abs_diff_eq!(re[k], want_re[k], epsilon = 1e-5);
            assert_abs_diff_eq!(im[k], want_im[k], epsilon = 1e-5);
        }
    }

    #[test]
    fn complex_spectrum_pads_short_imaginary_part() {
        // x = [1 + 1i, 1 + 0i] -> X = [2 + 1i, 0 + 1i]
        let (re, im) = complex_spectrum(&[1.0, 1.0], Some(&[1.0])).expect("valid input");
        assert_abs_diff_eq!(re[0], 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(im[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(re[1], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(im[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn complex_spectrum_needs_two_samples() {
        assert!(complex_spectrum(&[1.0], None).is_err());
    }

    #[test]
    fn sliding_cross_correlation_finds_embedded_pattern() {
        let pattern = [1.0f32, -1.0, 2.0];
        let mut signal = vec![0.0f32; 10];
        signal[4..7].copy_from_slice(&pattern);

        let out = sliding_cross_correlation(&signal, &pattern).expect("valid input");
        assert_eq!(out.len(), 7);

        let size = 2.0 * (signal.len() + pattern.len()) as f32;
        for (lag, v) in out.iter().enumerate() {
            let expected: f32 = pattern
                .iter()
                .enumerate()
                .map(|(j, p)| signal[lag + j] * p)
                .sum::<f32>()
                / size;
            assert_abs_diff_eq!(*v, expected, epsilon = 1e-5);
        }
        let peak = out
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(lag, _)| lag);
        assert_eq!(peak, Some(4));
    }

    #[test]
    fn sliding_cross_correlation_is_order_independent() {
        let long = [0.5f32, 1.0, -0.5, 2.0, 0.0, 1.5];
        let short = [1.0f32, 2.0];
        let ab = sliding_cross_correlation(&long, &short).expect("valid input");
        let ba = sliding_cross_correlation(&short, &long).expect("valid input");
        assert_eq!(ab.len(), 4);
        for (l, r) in ab.iter().zip(&ba) {
            assert_abs_diff_eq!(*l, *r, epsilon = 1e-6);
        }
    }

    #[test]
    fn sliding_cross_correlation_edge_cases() {
        assert!(sliding_cross_correlation(&[], &[1.0]).is_err());
        assert!(sliding_cross_correlation(&[1.0], &[]).is_err());
        let out = sliding_cross_correlation(&[1.0, 2.0], &[3.0, 4.0]).expect("valid input");
        assert!(out.is_empty());
    }
}
