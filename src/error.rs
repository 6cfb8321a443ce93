//! Error types for RTF parsing.

use thiserror::Error;

/// Result type for RTF operations.
pub type RtfResult<T> = Result<T, RtfError>;

/// RTF parsing errors. Every variant carries the byte offset at which the
/// failure was detected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RtfError {
    /// Malformed hex escape, bad byte after `\`, invalid digits in a parameter.
    #[error("lex error at byte {offset}: {message}")]
    Lex { offset: usize, message: String },

    /// Unmatched `}`, EOF inside a group, or the root destination receiving
    /// non-NUL text.
    #[error("structural error at byte {offset}: {message}")]
    Structural { offset: usize, message: String },

    /// A byte sequence could not be decoded under the resolved encoding.
    #[error("encoding error at byte {offset}: {message}")]
    Encoding { offset: usize, message: String },

    /// A high surrogate `\u` was not immediately followed by a low surrogate `\u`.
    #[error("surrogate error at byte {offset}: {message}")]
    Surrogate { offset: usize, message: String },

    /// A text/par/page-break event was delivered to a destination that does
    /// not accept it.
    #[error("destination error at byte {offset}: {message}")]
    Destination { offset: usize, message: String },

    /// `\fcharsetN` named an `N` absent from the resolution table and not 1 or 3.
    #[error("unknown fcharset {charset} at byte {offset}")]
    UnknownCharset { offset: usize, charset: i32 },
}

impl RtfError {
    /// The byte offset at which this error was detected.
    pub fn offset(&self) -> usize {
        match self {
            RtfError::Lex { offset, .. }
            | RtfError::Structural { offset, .. }
            | RtfError::Encoding { offset, .. }
            | RtfError::Surrogate { offset, .. }
            | RtfError::Destination { offset, .. }
            | RtfError::UnknownCharset { offset, .. } => *offset,
        }
    }

    pub(crate) fn lex(offset: usize, message: impl Into<String>) -> Self {
        RtfError::Lex {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn structural(offset: usize, message: impl Into<String>) -> Self {
        RtfError::Structural {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn encoding(offset: usize, message: impl Into<String>) -> Self {
        RtfError::Encoding {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn surrogate(offset: usize, message: impl Into<String>) -> Self {
        RtfError::Surrogate {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn destination(offset: usize, message: impl Into<String>) -> Self {
        RtfError::Destination {
            offset,
            message: message.into(),
        }
    }
}
