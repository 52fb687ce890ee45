use thiserror::Error;
use validator::ValidationErrors;

/// Errors surfaced by lattice construction, runs and phase sweeps.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IsingError {
    /// A parameter is out of range or a tag is not recognized.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// `run` was called on a runner that has already started.
    #[error("simulation has already been run; build a new runner for another run")]
    AlreadyRun,
}

impl IsingError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

impl From<ValidationErrors> for IsingError {
    fn from(e: ValidationErrors) -> Self {
        Self::InvalidConfiguration(format!("{e}"))
    }
}

pub type Result<T> = std::result::Result<T, IsingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_validation_errors_become_invalid_configuration() {
        let mut errors = ValidationErrors::new();
        errors.add("size", ValidationError::new("lattice size must be >= 1"));
        let err = IsingError::from(errors);
        assert!(matches!(err, IsingError::InvalidConfiguration(_)));
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
