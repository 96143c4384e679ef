//! Error taxonomy for envelope decoding.
//!
//! A buffer that does not carry the envelope magic is never an error: it is
//! handed back unchanged as [`Decoded::Raw`](crate::Decoded::Raw). Every
//! variant here means the magic matched but the envelope could not be trusted,
//! so the whole decode is abandoned and no partial result is produced.

use std::{io, str::Utf8Error};

use thiserror::Error;

/// Which declared size disagreed with the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeField {
    /// `total_size` did not equal the buffer length.
    Total,
    /// `data_len` did not equal the header's `data_size`.
    DataLength,
}

impl std::fmt::Display for SizeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Total => "total size",
            Self::DataLength => "data length",
        })
    }
}

/// Region of the envelope being read when decoding stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// Fixed-width header integers.
    Header,
    /// Key name bytes.
    Key,
    /// Hash field name bytes.
    Field,
    /// Opaque payload bytes.
    Payload,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Header => "header",
            Self::Key => "key",
            Self::Field => "field",
            Self::Payload => "payload",
        })
    }
}

/// Errors produced while decoding a buffer that carries the envelope magic.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Magic matched but the fixed size fields are not all present.
    #[error("malformed envelope header: {len} bytes, need at least {min}")]
    MalformedHeader {
        /// Actual buffer length.
        len: usize,
        /// Minimum length needed to read the size fields.
        min: usize,
    },

    /// A declared size disagrees with what the buffer actually holds.
    #[error("envelope {what} mismatch: declared {declared}, found {actual}")]
    SizeMismatch {
        /// Which declaration was wrong.
        what: SizeField,
        /// Value written in the envelope.
        declared: u64,
        /// Value observed.
        actual: u64,
    },

    /// A read would run past the end of the buffer.
    #[error("envelope truncated in {region} at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        /// Region being read.
        region: Region,
        /// Cursor offset where the read started.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes remaining in the buffer.
        available: usize,
    },

    /// Key or field bytes are not valid UTF-8.
    #[error("invalid UTF-8 in envelope {region}: {source}")]
    InvalidEncoding {
        /// Region holding the bad bytes; only key or field.
        region: Region,
        /// Underlying validation failure.
        #[source]
        source: Utf8Error,
    },
}

/// Fieldless category of a [`DecodeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    /// See [`DecodeError::MalformedHeader`].
    MalformedHeader,
    /// See [`DecodeError::SizeMismatch`].
    SizeMismatch,
    /// See [`DecodeError::Truncated`].
    Truncated,
    /// See [`DecodeError::InvalidEncoding`].
    InvalidEncoding,
}

impl DecodeError {
    /// Category of this error for callers that only branch on kind.
    #[must_use]
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            Self::MalformedHeader { .. } => DecodeErrorKind::MalformedHeader,
            Self::SizeMismatch { .. } => DecodeErrorKind::SizeMismatch,
            Self::Truncated { .. } => DecodeErrorKind::Truncated,
            Self::InvalidEncoding { .. } => DecodeErrorKind::InvalidEncoding,
        }
    }

    pub(crate) fn size_mismatch(what: SizeField, declared: u32, actual: u64) -> Self {
        Self::SizeMismatch {
            what,
            declared: u64::from(declared),
            actual,
        }
    }
}

impl From<DecodeError> for io::Error {
    fn from(err: DecodeError) -> Self {
        let kind = match err.kind() {
            DecodeErrorKind::Truncated => io::ErrorKind::UnexpectedEof,
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err)
    }
}
