use crate::tag::TagKind;
use thiserror::Error;

/// Convenience alias used throughout nbte-core.
pub type Result<T> = std::result::Result<T, NbtError>;

/// Top-level error for document loading, saving, and mutation.
#[derive(Error, Debug)]
pub enum NbtError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed or unsupported envelope/tag stream.
    #[error("format error: {0}")]
    Format(String),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Rejected input, e.g. an empty compound key.
    #[error("validation error: {0}")]
    Validation(String),

    /// Kind-incompatible mutation, e.g. setting a scalar on a compound.
    #[error("type error: {0}")]
    Type(String),
}

/// Addressing failures while walking a path from the document root.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("no node at {0}")]
    NotFound(String),

    /// A segment tried to descend into a node that has no addressable
    /// children of that shape (scalar, array, key into a list, ...).
    #[error("cannot address into {kind} node at {path}")]
    TypeMismatch { path: String, kind: &'static str },

    #[error("the document root cannot be deleted")]
    IsRoot,
}

/// Text coercion and search-pattern failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("not a valid {kind} value: {text:?}")]
    InvalidNumber { kind: TagKind, text: String },

    #[error("{text:?} is out of range for {kind}")]
    OutOfRange { kind: TagKind, text: String },

    #[error("invalid regular expression: {0}")]
    InvalidRegex(String),
}
