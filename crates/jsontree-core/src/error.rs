//! Error types for value construction, coercion, mutation and text I/O.

use thiserror::Error;

/// Errors raised by the value model.
///
/// Every failure is local and immediate: the operation that returns it has
/// left the tree unmodified.
#[derive(Error, Debug)]
pub enum JsonError {
    /// Conversion between incompatible kinds or host types.
    #[error("cannot convert {from} to {to}")]
    InvalidCast { from: String, to: &'static str },

    /// A numeric value does not fit the requested target type.
    #[error("value {value} is out of range for {target}")]
    Overflow { value: String, target: &'static str },

    /// Malformed text, either a JSON document or a scalar being converted.
    /// `position` is the byte offset where the problem was detected, when known.
    #[error("{}", format_message(message, *position))]
    Format {
        message: String,
        position: Option<usize>,
    },

    /// An object already holds the key being inserted.
    #[error("duplicate key: \"{0}\"")]
    DuplicateKey(String),

    /// The index type is not valid for the kind being indexed.
    #[error("cannot index a value of kind {kind} with {index_type}")]
    UnsupportedIndexer {
        index_type: &'static str,
        kind: crate::JsonKind,
    },

    /// Malformed index or argument (negative, non-integral, null, compound,
    /// out of range, or an undefined value offered for storage).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not valid for the current value.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Failure of the underlying reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_message(message: &str, position: Option<usize>) -> String {
    match position {
        Some(pos) => format!("format error at byte {pos}: {message}"),
        None => format!("format error: {message}"),
    }
}

impl JsonError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        JsonError::Format {
            message: message.into(),
            position: None,
        }
    }

    pub(crate) fn format_at(message: impl Into<String>, position: usize) -> Self {
        JsonError::Format {
            message: message.into(),
            position: Some(position),
        }
    }

    pub(crate) fn overflow(value: impl ToString, target: &'static str) -> Self {
        JsonError::Overflow {
            value: value.to_string(),
            target,
        }
    }

    pub(crate) fn invalid_cast(from: impl Into<String>, to: &'static str) -> Self {
        JsonError::InvalidCast {
            from: from.into(),
            to,
        }
    }
}

/// Convenience alias used throughout jsontree-core.
pub type Result<T> = std::result::Result<T, JsonError>;
