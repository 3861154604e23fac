use thiserror::Error;

use crate::env::EnvError;

/// Errors raised by the harness
#[derive(Debug, Error)]
pub enum Error {
    /// A hyperparameter is out of range or has the wrong type
    #[error("Invalid value for `{name}`. {reason}")]
    InvalidConfiguration { name: String, reason: String },

    /// An action index outside of the fixed action space
    #[error("Invalid action {action}. Action space has {size} actions.")]
    InvalidAction { action: usize, size: usize },

    /// A search dimension without candidates
    #[error("Search dimension `{0}` has no candidate values")]
    EmptySearchSpace(String),

    /// A search dimension that does not name a settable parameter
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// Failure reported by the environment, passed through untouched
    #[error("Environment error: {0}")]
    Environment(#[from] EnvError),
}

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::InvalidAction { action: 4, size: 2 };
        assert!(err.to_string().contains("Invalid action 4"), "action named");

        let err = Error::EmptySearchSpace("epsilon".to_string());
        assert!(err.to_string().contains("`epsilon`"), "dimension named");

        let err = Error::UnknownParameter("lr".to_string());
        assert!(err.to_string().contains("lr"), "parameter named");
    }

    #[test]
    fn environment_error_is_preserved() {
        let source: EnvError = Box::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            "socket closed",
        ));
        let err = Error::from(source);
        let Error::Environment(inner) = err else {
            panic!("expected environment variant");
        };
        assert!(
            inner.downcast_ref::<std::io::Error>().is_some(),
            "source error type recoverable"
        );
    }
}
