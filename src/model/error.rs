use thiserror::Error;

/// Error raised when a required value is missing or empty
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must not contain empty elements")]
    EmptyElement(&'static str),
}

/// Fails with [`InvalidInputError::Empty`] when `value` is empty
pub(crate) fn ensure_not_empty(name: &'static str, value: &str) -> Result<(), InvalidInputError> {
    if value.is_empty() {
        return Err(InvalidInputError::Empty(name));
    }
    Ok(())
}
