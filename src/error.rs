use thiserror::Error;

/// Raised when a lookup has no mapped value, no transformer result and no
/// default to fall back on.
///
/// The message is displayed verbatim, so errors compare equal by message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct MappingError {
    message: String,
}

impl MappingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Top-level error type for the mapping-fn library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("failed to parse mapping: {0}")]
    Parse(#[from] toml::de::Error),
}
