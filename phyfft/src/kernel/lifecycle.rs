use super::ConfigError;

/// Constructor validation lifecycle shared by kernel structs.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}

/// Reject a transform length of zero.
pub(crate) fn require_nonzero_len(arg: &'static str, n: usize) -> Result<usize, ConfigError> {
    if n == 0 {
        log::debug!("rejecting kernel config: `{arg}` is zero");
        return Err(ConfigError::InvalidArgument {
            arg,
            reason: "transform length must be greater than zero",
        });
    }
    Ok(n)
}
