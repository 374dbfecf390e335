//! Error types for kwilorm

use thiserror::Error;

/// Result type alias for kwilorm operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for builder and connector operations
#[derive(Debug, Error)]
pub enum OrmError {
    /// No connection registered under the requested name
    #[error("Not found: {0}")]
    NotFound(String),

    /// The connector answered with an error message instead of a result
    #[error("Execution error: {0}")]
    Execution(String),

    /// A query hook refused the statement before it was sent
    #[error("Query aborted by hook: {0}")]
    HookAborted(String),

    /// Builder state that cannot be rendered into a statement
    #[error("Validation error: {0}")]
    Validation(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Configuration file could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl OrmError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an execution error carrying the connector message verbatim
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is an execution error
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// Check if a query hook refused the statement
    pub fn is_hook_aborted(&self) -> bool {
        matches!(self, Self::HookAborted(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The connector message, if this error came from the connector
    pub fn execution_message(&self) -> Option<&str> {
        match self {
            Self::Execution(msg) => Some(msg),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OrmError {
    fn from(err: std::io::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::de::Error> for OrmError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
