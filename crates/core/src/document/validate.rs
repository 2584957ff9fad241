/// Document id validation.
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("document id cannot be empty")]
    EmptyId,
    #[error("document id `{0}` must not contain '/'")]
    NestedId(String),
    #[error("document id `{0}` must not have surrounding whitespace")]
    PaddedId(String),
}

/// Validate that an id addresses exactly one document inside a collection.
pub fn validate_document_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if id.contains('/') {
        return Err(ValidationError::NestedId(id.to_string()));
    }
    if id.trim() != id {
        return Err(ValidationError::PaddedId(id.to_string()));
    }
    Ok(())
}
