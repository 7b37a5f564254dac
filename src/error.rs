//! Structured error types for wire encoding and decoding.

use std::fmt;

/// Main error type for codec operations.
///
/// Every encode/decode entry point returns these directly; nothing is logged
/// or retried internally. Retry policy belongs to the network layer that owns
/// the buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// Writer output would exceed the capacity of the caller's buffer.
    /// Carries the number of bytes the write needed.
    BufferTooSmall(usize),
    /// A parser read would run past the end of the buffer.
    /// Carries the offset at which the read was attempted.
    TruncatedBuffer(usize),
    /// A compression pointer targets an offset outside the buffer, or does
    /// not point strictly backward. Carries the offending offset.
    InvalidPointer(usize),
    /// A label exceeds the 63-byte wire limit. Carries the label length.
    LabelTooLong(usize),
    /// A decoded hostname exceeds the 253-byte limit. Carries the length
    /// reached when the limit was hit.
    NameTooLong(usize),
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::BufferTooSmall(needed) => {
                write!(f, "Output buffer too small: {} bytes required", needed)
            }
            WireError::TruncatedBuffer(offset) => {
                write!(f, "Truncated buffer: read past end at offset {}", offset)
            }
            WireError::InvalidPointer(offset) => {
                write!(f, "Invalid compression pointer to offset {}", offset)
            }
            WireError::LabelTooLong(len) => {
                write!(f, "Label of {} bytes exceeds maximum length (63)", len)
            }
            WireError::NameTooLong(len) => {
                write!(f, "Hostname of {} bytes exceeds maximum length (253)", len)
            }
        }
    }
}

impl std::error::Error for WireError {}

/// Convenience type alias for Results using WireError
pub type Result<T> = std::result::Result<T, WireError>;
