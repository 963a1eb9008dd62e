use std::fmt;

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The rule store could not be read or written.
    #[error("Storage failure: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Anything that carries an HTTP-ish status code and a human-readable message.
///
/// The resolver accepts any value with these two observable properties, so
/// structured application errors and ad-hoc failures go through the same path.
pub trait HttpFailure {
    fn code(&self) -> u16;
    fn message(&self) -> String;
}

impl HttpFailure for CoreError {
    fn code(&self) -> u16 {
        match self {
            CoreError::NotFound { .. } => 404,
            CoreError::Validation(_) => 400,
            CoreError::Conflict(_) => 409,
            CoreError::Storage(_) | CoreError::Internal(_) => 500,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}

/// An owned, renderable error with an optional cause chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub code: u16,
    pub message: String,
    pub cause: Option<Box<ErrorReport>>,
}

impl ErrorReport {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Snapshot any [`HttpFailure`] into an owned report.
    pub fn from_failure<E: HttpFailure + ?Sized>(error: &E) -> Self {
        Self::new(error.code(), error.message())
    }

    pub fn with_cause(mut self, cause: ErrorReport) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Re-signal this error under a different code, keeping the message and
    /// wrapping the original as the cause.
    pub fn recode(self, code: u16) -> Self {
        Self::new(code, self.message.clone()).with_cause(self)
    }
}

impl HttpFailure for ErrorReport {
    fn code(&self) -> u16 {
        self.code
    }

    fn message(&self) -> String {
        self.message.clone()
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl std::error::Error for ErrorReport {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}
