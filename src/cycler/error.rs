//! Errors produced by the phrase cycler

/// Convenience result type for cycler operations.
pub type CyclerResult<T> = Result<T, CyclerError>;

/// Failures the cycler can report to its host.
///
/// Only construction and reconfiguration can fail; a running cycler never
/// produces an error of its own.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CyclerError {
    /// Rejected phrase list or timing values.
    #[error("invalid cycler config: {0}")]
    InvalidConfig(String),

    /// The driver task has already been torn down.
    #[error("cycler has been stopped")]
    Stopped,
}

impl CyclerError {
    /// Build a [`CyclerError::InvalidConfig`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = CyclerError::invalid_config("typing_interval_ms must be positive");
        assert_eq!(
            err.to_string(),
            "invalid cycler config: typing_interval_ms must be positive"
        );
    }

    #[test]
    fn test_stopped_message() {
        assert_eq!(CyclerError::Stopped.to_string(), "cycler has been stopped");
    }
}
