use crate::kernel::{ConfigError, ExecInvariantViolation};
use core::fmt;

/// Errors raised by the free-function entrypoints of phyfft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A length or buffer passed to an operation was invalid.
    InvalidArgument {
        /// The invalid argument.
        arg: String,
        /// Why the argument is invalid.
        reason: String,
    },
    /// The FFT backend failed to plan or run a transform.
    TransformEngineFailure {
        /// Backend message.
        reason: String,
    },
}

/// Result alias for phyfft entrypoints.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
            Error::TransformEngineFailure { reason } => {
                write!(f, "Transform engine failure: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        let arg = match &value {
            ConfigError::InvalidArgument { arg, .. } | ConfigError::NonContiguous { arg } => *arg,
        };
        Error::InvalidArgument {
            arg: arg.into(),
            reason: value.to_string(),
        }
    }
}

impl From<ExecInvariantViolation> for Error {
    fn from(value: ExecInvariantViolation) -> Self {
        match &value {
            ExecInvariantViolation::TransformEngine { .. } => Error::TransformEngineFailure {
                reason: value.to_string(),
            },
            ExecInvariantViolation::Config(err) => err.clone().into(),
            ExecInvariantViolation::LengthMismatch { arg, .. } => Error::InvalidArgument {
                arg: (*arg).into(),
                reason: value.to_string(),
            },
            ExecInvariantViolation::InvalidState { .. } | ExecInvariantViolation::Layout(_) => {
                Error::InvalidArgument {
                    arg: "buffer".into(),
                    reason: value.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TransformKind;

    #[test]
    fn engine_failures_keep_their_category() {
        let err: Error = ExecInvariantViolation::TransformEngine {
            kind: TransformKind::RealForward,
            reason: "planner refused".into(),
        }
        .into();
        assert_eq!(
            err,
            Error::TransformEngineFailure {
                reason: "real to half-complex transform failed: planner refused".into()
            }
        );
    }

    #[test]
    fn length_mismatch_becomes_invalid_argument() {
        let err: Error = ExecInvariantViolation::LengthMismatch {
            arg: "y",
            expected: 16,
            got: 12,
        }
        .into();
        match err {
            Error::InvalidArgument { arg, reason } => {
                assert_eq!(arg, "y");
                assert!(reason.contains("Expected 16, got 12"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
