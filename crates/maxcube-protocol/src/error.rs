//! Protocol error types.

use thiserror::Error;

/// Errors that prevent a configuration message from being decoded at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The payload could not be split into address and data tokens, or the
    /// data token is not valid Base64.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The message line carries a type prefix other than `C:`.
    #[error("unexpected message type: {0:?}")]
    UnexpectedMessageType(String),
}

impl ProtocolError {
    /// Create a malformed payload error.
    pub fn malformed(message: impl Into<String>) -> Self {
        ProtocolError::MalformedPayload(message.into())
    }
}

/// Errors raised while extracting fields from a decoded frame.
///
/// These never escape a record decode; they are turned into
/// [`Diagnostic::FieldDecodeDegraded`](crate::Diagnostic::FieldDecodeDegraded).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A read went past the end of the frame.
    #[error("read of {len} byte(s) at offset {offset} exceeds frame length {frame_len}")]
    OutOfBounds {
        /// Offset of the read.
        offset: usize,
        /// Number of bytes requested.
        len: usize,
        /// Actual frame length.
        frame_len: usize,
    },

    /// The program table ended in the middle of a switch point.
    #[error("program table truncated: dangling byte at offset {offset}")]
    DanglingProgramByte {
        /// Offset of the unpaired byte.
        offset: usize,
    },
}

/// Result type alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
