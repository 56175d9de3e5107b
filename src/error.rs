//! Error types for the codec.
//!
//! Two layers, kept separate to maintain clean separation of concerns:
//! [`ValueParseError`] covers failures turning a value string into a typed
//! value, while [`CodecError`] covers whole-operation failures and carries
//! the surrounding context (key, line number, target kind).

use crate::schema::ValueKind;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// A specialized `Result` type for encode/decode operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Error type returned by caller-supplied fallback hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while parsing a single value string.
#[derive(Debug, Error)]
pub enum ValueParseError {
    /// The string is not a valid base-10 integer.
    #[error("invalid integer: {0}")]
    Int(#[from] ParseIntError),

    /// The string is not a valid decimal or exponential float.
    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),

    /// The string is not one of the accepted boolean forms.
    #[error("invalid boolean {raw:?}")]
    Bool { raw: String },

    /// A comma-separated composite had the wrong number of parts.
    #[error("expected {expected} comma-separated parts, found {found}")]
    PartCount { expected: usize, found: usize },
}

/// Errors that can occur during an `encode` or `decode` operation.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Writing a field line to the sink failed.
    #[error("write {key} as {kind}: {source}")]
    Write {
        key: String,
        kind: ValueKind,
        #[source]
        source: std::io::Error,
    },

    /// Reading a line from the source failed.
    #[error("read line {line}: {source}")]
    Read {
        line: u64,
        #[source]
        source: std::io::Error,
    },

    /// A declared default string does not parse as the field's kind.
    #[error("parse default {raw:?} for {key} as {kind}: {source}")]
    DefaultParse {
        key: String,
        kind: ValueKind,
        raw: String,
        #[source]
        source: ValueParseError,
    },

    /// A matched assignment value does not parse as the field's kind.
    #[error("line {line}: parse {key} = {value} as {kind}: {source}")]
    LineParse {
        line: u64,
        key: String,
        value: String,
        kind: ValueKind,
        #[source]
        source: ValueParseError,
    },

    /// The kind is not supported on the current path.
    #[error("unsupported kind {kind} for key {key}")]
    UnsupportedKind { key: String, kind: ValueKind },

    /// An assignment line matched a field whose kind the line parser
    /// does not handle.
    #[error("line {line}: unsupported kind {kind} for key {key}")]
    UnsupportedLineKind {
        line: u64,
        key: String,
        kind: ValueKind,
    },

    /// An assignment line's key matches no declared field.
    #[error("line {line}: unknown key {key}")]
    UnknownKey { line: u64, key: String },

    /// A declared key never appeared in the input.
    #[error("missing key {key}")]
    MissingKey { key: String },

    /// A fallback hook reported an error of its own.
    #[error("fallback for {key}: {source}")]
    Fallback {
        key: String,
        #[source]
        source: HookError,
    },
}

impl CodecError {
    /// Create an UnsupportedKind error from a key and kind.
    pub fn unsupported(key: impl Into<String>, kind: ValueKind) -> Self {
        Self::UnsupportedKind {
            key: key.into(),
            kind,
        }
    }

    /// Create a MissingKey error from a key.
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::unsupported("scale", ValueKind::Float32);
        assert_eq!(err.to_string(), "unsupported kind float32 for key scale");

        let err = CodecError::missing_key("width");
        assert_eq!(err.to_string(), "missing key width");

        let err = CodecError::UnknownKey {
            line: 3,
            key: "bogus".to_string(),
        };
        assert_eq!(err.to_string(), "line 3: unknown key bogus");
    }

    #[test]
    fn test_part_count_display() {
        let err = ValueParseError::PartCount {
            expected: 4,
            found: 3,
        };
        assert_eq!(err.to_string(), "expected 4 comma-separated parts, found 3");
    }

    #[test]
    fn test_line_parse_context() {
        let source = "abc".parse::<i64>().unwrap_err();
        let err = CodecError::LineParse {
            line: 7,
            key: "width".to_string(),
            value: "abc".to_string(),
            kind: ValueKind::Int,
            source: ValueParseError::Int(source),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("width = abc"));
        assert!(msg.contains("as int"));
    }
}
