use super::{require_len, ConfigError, ExecInvariantViolation};
use ndarray::{Array1, ArrayView1, ArrayViewMut1};

/// Adapter trait for reading a contiguous sample buffer.
pub trait Read1D<T> {
    /// Borrow the underlying input as a contiguous slice.
    fn read_slice(&self) -> Result<&[T], ConfigError>;
}

/// Adapter trait for buffers that are transformed in place.
///
/// The borrow returned by [`Write1D::write_slice_mut`] is the only view a
/// kernel holds on caller memory; it ends when the kernel call returns.
pub trait Write1D<T> {
    /// Borrow the underlying buffer as a mutable contiguous slice.
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError>;
}

impl<T> Read1D<T> for [T] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T> Write1D<T> for [T] {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self)
    }
}

impl<T, const N: usize> Read1D<T> for [T; N] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T, const N: usize> Write1D<T> for [T; N] {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self)
    }
}

impl<T> Read1D<T> for Vec<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self.as_slice())
    }
}

impl<T> Write1D<T> for Vec<T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self.as_mut_slice())
    }
}

impl<T> Read1D<T> for Array1<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        self.as_slice()
            .ok_or(ConfigError::NonContiguous { arg: "array" })
    }
}

impl<T> Write1D<T> for Array1<T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        self.as_slice_mut()
            .ok_or(ConfigError::NonContiguous { arg: "array" })
    }
}

impl<'a, T> Read1D<T> for ArrayView1<'a, T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        self.as_slice()
            .ok_or(ConfigError::NonContiguous { arg: "array_view" })
    }
}

impl<'a, T> Write1D<T> for ArrayViewMut1<'a, T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        self.as_slice_mut().ok_or(ConfigError::NonContiguous {
            arg: "array_view_mut",
        })
    }
}

/// Bind the first `n` samples of `buf` for in-place processing.
pub(crate) fn leading_mut<'b, T, B>(
    buf: &'b mut B,
    arg: &'static str,
    n: usize,
) -> Result<&'b mut [T], ExecInvariantViolation>
where
    B: Write1D<T> + ?Sized,
{
    let slice = buf.write_slice_mut()?;
    require_len(arg, n, slice.len())?;
    Ok(&mut slice[..n])
}

/// Bind the first `n` samples of `buf` read-only.
pub(crate) fn leading<'b, T, B>(
    buf: &'b B,
    arg: &'static str,
    n: usize,
) -> Result<&'b [T], ExecInvariantViolation>
where
    B: Read1D<T> + ?Sized,
{
    let slice = buf.read_slice()?;
    require_len(arg, n, slice.len())?;
    Ok(&slice[..n])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{s, Array1};

    #[test]
    fn leading_mut_binds_prefix_of_longer_buffer() {
        let mut samples = vec![1.0f32, 2.0, 3.0, 4.0, 5.0];
        let head = leading_mut(&mut samples, "x", 3).expect("long enough");
        head.iter_mut().for_each(|v| *v *= 10.0);
        assert_eq!(samples, vec![10.0, 20.0, 30.0, 4.0, 5.0]);
    }

    #[test]
    fn leading_rejects_short_buffer() {
        let samples = [0.5f64; 3];
        let err = leading(&samples, "y", 4).expect_err("too short");
        assert_eq!(
            err,
            ExecInvariantViolation::LengthMismatch {
                arg: "y",
                expected: 4,
                got: 3
            }
        );
    }

    #[test]
    fn ndarray_buffers_bind_when_contiguous() {
        let mut arr = Array1::from(vec![0.0f32, 1.0, 2.0, 3.0]);
        leading_mut(&mut arr, "x", 4)
            .expect("contiguous array")
            .copy_from_slice(&[4.0, 5.0, 6.0, 7.0]);
        assert_eq!(arr.as_slice().expect("slice"), &[4.0, 5.0, 6.0, 7.0]);

        let view = arr.view();
        assert_eq!(leading(&view, "x", 2).expect("contiguous view"), &[4.0, 5.0]);
    }

    #[test]
    fn strided_view_is_rejected() {
        let mut arr = Array1::from(vec![0.0f64; 8]);
        let mut strided = arr.slice_mut(s![..;2]);
        let err = leading_mut(&mut strided, "x", 4).expect_err("strided view");
        assert_eq!(
            err,
            ExecInvariantViolation::Config(ConfigError::NonContiguous {
                arg: "array_view_mut"
            })
        );
    }
}
