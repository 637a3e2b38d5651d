use crate::engine::TransformKind;
use core::fmt;

/// Validation errors raised at kernel construction or adapter binding time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration argument value is invalid.
    InvalidArgument {
        /// Name of the argument.
        arg: &'static str,
        /// Human readable reason.
        reason: &'static str,
    },
    /// A contiguous 1D slice view could not be obtained.
    NonContiguous {
        /// Name of the argument that is non-contiguous.
        arg: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidArgument { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
            ConfigError::NonContiguous { arg } => {
                write!(f, "Argument `{arg}` is not contiguous in memory.")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime failures of checked kernel entrypoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecInvariantViolation {
    /// An execution precondition was violated.
    InvalidState {
        /// Human readable reason.
        reason: &'static str,
    },
    /// A buffer is shorter than the kernel length, or two buffers that must
    /// match do not.
    LengthMismatch {
        /// Name of the argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
    /// Adapter binding/configuration failure.
    Config(ConfigError),
    /// The half-complex view rejected a buffer.
    Layout(phyfft_core::Error),
    /// The FFT backend could not plan or execute a transform.
    TransformEngine {
        /// Transform that failed.
        kind: TransformKind,
        /// Backend message.
        reason: String,
    },
}

impl From<ConfigError> for ExecInvariantViolation {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<phyfft_core::Error> for ExecInvariantViolation {
    fn from(value: phyfft_core::Error) -> Self {
        Self::Layout(value)
    }
}

impl fmt::Display for ExecInvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecInvariantViolation::InvalidState { reason } => {
                write!(f, "Execution invariant violation: {reason}")
            }
            ExecInvariantViolation::LengthMismatch { arg, expected, got } => {
                write!(
                    f,
                    "Execution length mismatch on `{arg}`. Expected {expected}, got {got}."
                )
            }
            ExecInvariantViolation::Config(err) => write!(f, "{err}"),
            ExecInvariantViolation::Layout(err) => write!(f, "{err}"),
            ExecInvariantViolation::TransformEngine { kind, reason } => {
                write!(f, "{kind} transform failed: {reason}")
            }
        }
    }
}

impl std::error::Error for ExecInvariantViolation {}

/// Require `got >= expected` for a buffer bound to a kernel of fixed length.
pub(crate) fn require_len(
    arg: &'static str,
    expected: usize,
    got: usize,
) -> Result<(), ExecInvariantViolation> {
    if got < expected {
        log::debug!("buffer `{arg}` holds {got} samples, kernel needs {expected}");
        return Err(ExecInvariantViolation::LengthMismatch { arg, expected, got });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_argument() {
        let err = ExecInvariantViolation::LengthMismatch {
            arg: "y",
            expected: 8,
            got: 6,
        };
        assert_eq!(
            err.to_string(),
            "Execution length mismatch on `y`. Expected 8, got 6."
        );

        let err = ExecInvariantViolation::TransformEngine {
            kind: TransformKind::RealInverse,
            reason: "bad input".into(),
        };
        assert_eq!(
            err.to_string(),
            "half-complex to real transform failed: bad input"
        );
    }

    #[test]
    fn require_len_accepts_longer_buffers() {
        assert!(require_len("x", 4, 4).is_ok());
        assert!(require_len("x", 4, 9).is_ok());
        assert_eq!(
            require_len("x", 4, 3),
            Err(ExecInvariantViolation::LengthMismatch {
                arg: "x",
                expected: 4,
                got: 3
            })
        );
    }
}
