use core::fmt;

/// Errors raised while viewing or rewriting a half-complex spectrum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A half-complex spectrum needs at least one coefficient.
    EmptySpectrum,
    /// Two buffers that describe the same spectrum disagree in length.
    InvalidLength {
        /// Which buffer had the wrong length.
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptySpectrum => write!(f, "Half-complex spectrum is empty."),
            Error::InvalidLength {
                what,
                expected,
                got,
            } => write!(
                f,
                "Invalid length for `{what}`. Expected {expected}, got {got}."
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Convenience alias for results in this crate.
pub type Result<T> = core::result::Result<T, Error>;
