//! Error types for engine setup.
//!
//! Every error here is raised while an [`Engine`](crate::engine::Engine) is
//! being built, before any random number is drawn. A running search never
//! fails: timeouts and "indistinguishable" crossovers are ordinary outcomes.

use thiserror::Error;

/// Error type for engine construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvolveError {
    /// Contradictory or missing setup.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The default create/mutate operators need more distinct symbols than
    /// the alphabet provides.
    #[error("Alphabet exhausted: need {required} distinct symbols, alphabet has {available}")]
    ExhaustedAlphabet { required: usize, available: usize },
}

impl EvolveError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias for engine setup.
pub type EvolveResult<T> = Result<T, EvolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display() {
        let err = EvolveError::config("pool_size must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: pool_size must be at least 1"
        );
    }

    #[test]
    fn test_exhausted_alphabet_display() {
        let err = EvolveError::ExhaustedAlphabet {
            required: 2,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "Alphabet exhausted: need 2 distinct symbols, alphabet has 1"
        );
    }
}
