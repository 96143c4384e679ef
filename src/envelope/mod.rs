//! Binary envelope carried in front of read responses.
//!
//! A store with read-response metadata enabled may hand back, instead of the
//! bare value, a buffer laid out as follows (all integers big-endian):
//!
//! ```text
//! [b"RDMT"][u32 total_size][u32 metadata_size][u32 data_size]
//! [u32 key_len][u32 field_len, hash reads only][u32 data_len]
//! [u64 access_timestamp][u64 keyspace_hits][u64 keyspace_misses][u8 data_type]
//! [key bytes][field bytes, if field_len > 0][payload bytes]
//! ```
//!
//! [`decode`] is the entry point. It never fails for buffers that lack the
//! magic; those come back as [`Decoded::Raw`](crate::Decoded::Raw).

mod cursor;
pub mod decode;
pub mod encode;
pub mod error;
mod header;
pub mod sniff;

pub use decode::decode;
pub use encode::EnvelopeBuilder;
pub use error::{DecodeError, DecodeErrorKind, Region, SizeField};
pub(crate) use header::EnvelopeHeader;
pub use sniff::{Sniff, sniff};

/// Magic prefix that marks an envelope.
pub const MAGIC: &[u8; 4] = b"RDMT";

/// Magic plus the three size fields; shorter envelopes are malformed.
pub const MIN_HEADER_LEN: usize = MAGIC.len() + 3 * size_of::<u32>();

/// Bytes from the buffer start to the optional field-length word.
pub const PREFIX_LEN: usize = MIN_HEADER_LEN + size_of::<u32>();

/// Size of the optional field-length word.
pub const FIELD_LEN_SIZE: usize = size_of::<u32>();

/// Fixed header bytes after the optional field-length word: data length,
/// timestamp, hit and miss counters, and type tag.
pub const TAIL_LEN: usize = size_of::<u32>() + 3 * size_of::<u64>() + size_of::<u8>();
