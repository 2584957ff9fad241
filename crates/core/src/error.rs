use thiserror::Error;

use crate::store::StoreError;

/// Failures raised by the content resolution layer.
///
/// Only `UnknownDomain` is a programming error; every other variant has a
/// local recovery path or is reported to the editor that caused it.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("document store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("malformed document {path}: field `{field}` {reason}")]
    MalformedDocument {
        path: String,
        field: String,
        reason: String,
    },

    #[error("unknown content domain: {0}")]
    UnknownDomain(String),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("write failed: {0}")]
    WriteFailed(String),

    #[error("the default notification cannot be deleted")]
    CannotDeleteDefault,

    #[error("{0} not found")]
    NotFound(String),
}

impl From<StoreError> for ContentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => ContentError::StoreUnavailable(msg),
            StoreError::WriteFailed(msg) => ContentError::WriteFailed(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
