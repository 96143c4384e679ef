//! Decide from the leading bytes whether a buffer is an envelope.

use log::trace;

use super::{MAGIC, MIN_HEADER_LEN, error::DecodeError};

/// Outcome of inspecting a buffer's prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sniff {
    /// The buffer is ordinary data and must be passed through untouched.
    Passthrough,
    /// The magic matched and the fixed size fields are readable.
    Envelope,
}

/// Classify `buf` without reading past its end.
///
/// Buffers shorter than the magic or with a different prefix are
/// [`Sniff::Passthrough`]; this never fails for non-envelope data.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedHeader`] when the magic matches but the
/// buffer is too short to hold the three size fields.
///
/// # Examples
///
/// ```
/// use readmeta::envelope::{Sniff, sniff};
///
/// assert_eq!(sniff(b"hello world"), Ok(Sniff::Passthrough));
/// assert!(sniff(b"RDMT").is_err());
/// ```
pub fn sniff(buf: &[u8]) -> Result<Sniff, DecodeError> {
    let Some(prefix) = buf.first_chunk::<4>() else {
        trace!("buffer of {} bytes is too short for envelope magic", buf.len());
        return Ok(Sniff::Passthrough);
    };
    if prefix != MAGIC {
        trace!("buffer prefix {prefix:02x?} is not envelope magic");
        return Ok(Sniff::Passthrough);
    }
    if buf.len() < MIN_HEADER_LEN {
        return Err(DecodeError::MalformedHeader {
            len: buf.len(),
            min: MIN_HEADER_LEN,
        });
    }
    Ok(Sniff::Envelope)
}
