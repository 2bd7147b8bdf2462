use thiserror::Error;

pub type OopResult<T> = Result<T, OopError>;

/// Every failure the class runtime signals. All of them abort the current
/// operation; nothing is retried or suppressed internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OopError {
    /// Wrong type or shape passed to an operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A property name is already taken where uniqueness is required.
    #[error("property conflict: {0}")]
    PropertyConflict(String),
    /// The receiver does not own the resource it was asked to modify.
    #[error("not owner: {0}")]
    NotOwner(String),
    /// The trait does not share a compatible base with its host.
    #[error("invalid trait: {0}")]
    InvalidTrait(String),
    /// A name breaks the private prefix convention.
    #[error("prefix violation: {0}")]
    PrefixViolation(String),
    /// Mock operations need a shadow-layered realm.
    #[error("diagnostic mode required: {0}")]
    DiagnosticModeRequired(String),
    /// Assignment to a read-only property or a setter-less accessor.
    #[error("read-only property: {0}")]
    ReadOnly(String),
    /// Raised by user supplied callbacks.
    #[error("{0}")]
    Raised(String),
}

impl OopError {
    pub fn raised(message: impl Into<String>) -> Self {
        OopError::Raised(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        OopError::InvalidArgument(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            OopError::NotOwner("registry".to_string()).to_string(),
            "not owner: registry"
        );
        assert_eq!(OopError::raised("boom").to_string(), "boom");
    }
}
