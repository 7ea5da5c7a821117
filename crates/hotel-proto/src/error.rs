//! Error types for the hotel protocol library.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtoError`].
pub type Result<T, E = ProtoError> = std::result::Result<T, E>;

/// Protocol-structure decode and encode errors.
///
/// Decoders never panic on short or garbled input; a packet that cannot be
/// read in full yields an error and is otherwise left alone.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtoError {
    /// The packet body ended before a field could be read in full.
    #[error("unexpected end of packet body: wanted {wanted} more byte(s), {remaining} left")]
    UnexpectedEof {
        /// Bytes the field needed.
        wanted: usize,
        /// Bytes actually left in the body.
        remaining: usize,
    },

    /// A length-prefixed string was not valid UTF-8.
    #[error("invalid utf-8 in string field: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A string does not fit the u16 length prefix.
    #[error("string field of {0} bytes does not fit a u16 length prefix")]
    StringTooLong(usize),

    /// Negative record count in a list field.
    #[error("invalid record count: {0}")]
    InvalidCount(i32),

    /// Unknown entity-kind discriminator in a room user list.
    #[error("unknown entity kind: {0}")]
    UnknownEntityKind(i32),

    /// Unknown gender code in a user entity.
    #[error("unknown gender code: {0:?}")]
    UnknownGender(String),
}
