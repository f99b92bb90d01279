//! Compile-time error types for templite.

use std::io::Error as IoError;
use std::path::PathBuf;

use thiserror::Error;

/// A template that failed to compile.
///
/// Every variant carries the offending fragment and the byte offset of the
/// token it came from, so tools can point at the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// `if` not followed by exactly one condition.
    #[error("malformed if: {tag:?}")]
    MalformedIf { tag: String, offset: usize },

    /// `for` not of the form `for NAME in ITER`.
    #[error("malformed for: {tag:?}")]
    MalformedFor { tag: String, offset: usize },

    /// `end...` followed by extra words.
    #[error("malformed end: {tag:?}")]
    MalformedEnd { tag: String, offset: usize },

    /// An `end...` tag with no open block.
    #[error("too many ends: {tag:?}")]
    TooManyEnds { tag: String, offset: usize },

    /// An `end...` tag that does not close the innermost open block.
    #[error("mismatched end tag: {found:?} does not close '{open}'")]
    MismatchedEnd {
        open: String,
        found: String,
        offset: usize,
    },

    /// A tag whose first word is not a known keyword.
    #[error("unrecognized tag: {word:?}")]
    UnrecognizedTag { word: String, offset: usize },

    /// A variable or filter name that is not an identifier.
    #[error("invalid identifier: {name:?}")]
    InvalidIdentifier { name: String, offset: usize },

    /// A block still open at the end of the template.
    #[error("unmatched open tag: '{kind}'")]
    UnmatchedOpen { kind: String, offset: usize },
}

impl SyntaxError {
    /// Byte offset of the token that caused the error.
    pub fn offset(&self) -> usize {
        match self {
            SyntaxError::MalformedIf { offset, .. }
            | SyntaxError::MalformedFor { offset, .. }
            | SyntaxError::MalformedEnd { offset, .. }
            | SyntaxError::TooManyEnds { offset, .. }
            | SyntaxError::MismatchedEnd { offset, .. }
            | SyntaxError::UnrecognizedTag { offset, .. }
            | SyntaxError::InvalidIdentifier { offset, .. }
            | SyntaxError::UnmatchedOpen { offset, .. } => *offset,
        }
    }

    /// The offending text fragment.
    pub fn fragment(&self) -> &str {
        match self {
            SyntaxError::MalformedIf { tag, .. }
            | SyntaxError::MalformedFor { tag, .. }
            | SyntaxError::MalformedEnd { tag, .. }
            | SyntaxError::TooManyEnds { tag, .. } => tag,
            SyntaxError::MismatchedEnd { found, .. } => found,
            SyntaxError::UnrecognizedTag { word, .. } => word,
            SyntaxError::InvalidIdentifier { name, .. } => name,
            SyntaxError::UnmatchedOpen { kind, .. } => kind,
        }
    }
}

/// Errors that occur while loading a template from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading the template.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// The template text did not compile.
    #[error("{path}: {source}")]
    Syntax {
        path: PathBuf,
        #[source]
        source: SyntaxError,
    },
}
