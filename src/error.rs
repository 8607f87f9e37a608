//! Error types and result utilities for audio frame operations.

use thiserror::Error;

use crate::SampleFormat;

/// Convenience type alias for results that may contain an [`AudioFrameError`].
pub type AudioFrameResult<T> = Result<T, AudioFrameError>;

/// Coarse classification of an [`AudioFrameError`].
///
/// Host adapters map these onto their own exception types (`TypeError`,
/// `RangeError`, `DataCloneError`, `InvalidStateError`, `NotSupportedError`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required field is missing or a numeric field is not positive.
    MalformedInput,
    /// The backing buffer is shorter than the format, channels and frames imply.
    InsufficientBuffer,
    /// The same buffer appears more than once in a transfer list.
    DuplicateTransfer,
    /// A plane index, frame window or destination size is out of range.
    Bounds,
    /// The frame set has already been closed.
    InvalidState,
    /// The requested copy conversion is outside the supported matrix.
    UnsupportedConversion,
}

/// Error types that can occur while constructing or reading an audio frame set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioFrameError {
    /// A required construction field was not provided.
    #[error("Missing required field '{field}'")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A field was provided but its value is not acceptable.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidParameter {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A sample format tag could not be parsed.
    #[error("Unknown sample format '{0}'")]
    UnknownFormat(String),

    /// The backing data is shorter than the frame layout requires.
    #[error("Insufficient buffer: {required} bytes required, {available} available")]
    InsufficientBuffer {
        /// Bytes implied by format, channels and frames.
        required: usize,
        /// Bytes actually present.
        available: usize,
    },

    /// The transfer list names the same buffer twice.
    #[error("Duplicate buffer in transfer list at index {index}")]
    DuplicateTransfer {
        /// Position of the second occurrence.
        index: usize,
    },

    /// An addressing parameter falls outside its valid range.
    #[error("{parameter} out of range: {value} (limit {limit})")]
    OutOfBounds {
        /// Name of the parameter that failed validation.
        parameter: &'static str,
        /// The value that was requested.
        value: usize,
        /// The exclusive (or inclusive, for counts) limit it was checked against.
        limit: usize,
    },

    /// The destination of a copy cannot hold the computed element count.
    #[error("Destination too small: {required} bytes required, {available} available")]
    DestinationTooSmall {
        /// Bytes the copy would write.
        required: usize,
        /// Bytes available in the destination.
        available: usize,
    },

    /// The operation was attempted on a closed frame set.
    #[error("Cannot {operation}: audio frame set is closed")]
    InvalidState {
        /// The rejected operation.
        operation: &'static str,
    },

    /// The copy conversion is not supported.
    #[error("Conversion from {from} to {to} is not supported")]
    UnsupportedConversion {
        /// Format of the frame set.
        from: SampleFormat,
        /// Format requested by the copy.
        to: SampleFormat,
    },
}

impl AudioFrameError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Create an out-of-bounds error
    pub const fn out_of_bounds(parameter: &'static str, value: usize, limit: usize) -> Self {
        Self::OutOfBounds {
            parameter,
            value,
            limit,
        }
    }

    /// Create an invalid state error for the named operation
    pub const fn closed(operation: &'static str) -> Self {
        Self::InvalidState { operation }
    }

    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField { .. } | Self::InvalidParameter { .. } | Self::UnknownFormat(_) => {
                ErrorKind::MalformedInput
            }
            Self::InsufficientBuffer { .. } => ErrorKind::InsufficientBuffer,
            Self::DuplicateTransfer { .. } => ErrorKind::DuplicateTransfer,
            Self::OutOfBounds { .. } | Self::DestinationTooSmall { .. } => ErrorKind::Bounds,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::UnsupportedConversion { .. } => ErrorKind::UnsupportedConversion,
        }
    }
}
