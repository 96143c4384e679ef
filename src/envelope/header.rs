//! Fixed-width envelope header.
//!
//! The header is everything before the key bytes: magic, the three size
//! fields, the key length, the optional field length, the data length, the
//! access statistics, and the type tag.

use log::debug;

use super::{
    FIELD_LEN_SIZE,
    MAGIC,
    TAIL_LEN,
    cursor::WireCursor,
    error::{DecodeError, Region, SizeField},
};
use crate::metadata::DataType;

/// Decoded header fields of an envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EnvelopeHeader {
    total_size: u32,
    metadata_size: u32,
    data_size: u32,
    key_len: u32,
    field_len: Option<u32>,
    access_timestamp: u64,
    keyspace_hits: u64,
    keyspace_misses: u64,
    data_type: DataType,
}

impl EnvelopeHeader {
    /// Parse the header from the start of `buf`, returning it with the
    /// offset of the first key byte.
    ///
    /// `buf` must be the whole envelope and must already have been accepted
    /// by [`sniff`](super::sniff()); `total_size` is checked against its
    /// length.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::SizeMismatch`] if `total_size` or `data_len`
    /// disagree with the buffer, and [`DecodeError::Truncated`] if the buffer
    /// ends inside the header.
    pub(crate) fn parse(buf: &[u8]) -> Result<(Self, usize), DecodeError> {
        let mut cursor = WireCursor::at(buf, MAGIC.len());
        let total_size = cursor.read_u32(Region::Header)?;
        let metadata_size = cursor.read_u32(Region::Header)?;
        let data_size = cursor.read_u32(Region::Header)?;
        if usize::try_from(total_size).ok() != Some(buf.len()) {
            return Err(DecodeError::size_mismatch(
                SizeField::Total,
                total_size,
                u64::try_from(buf.len()).unwrap_or(u64::MAX),
            ));
        }

        let key_len = cursor.read_u32(Region::Header)?;

        let field_len = if field_len_present(metadata_size, cursor.position()) {
            Some(cursor.read_u32(Region::Header)?)
        } else {
            None
        };
        debug!(
            "envelope metadata_size={metadata_size} field_len_present={}",
            field_len.is_some()
        );

        let data_len = cursor.read_u32(Region::Header)?;
        if data_len != data_size {
            return Err(DecodeError::size_mismatch(
                SizeField::DataLength,
                data_size,
                u64::from(data_len),
            ));
        }

        let access_timestamp = cursor.read_u64(Region::Header)?;
        let keyspace_hits = cursor.read_u64(Region::Header)?;
        let keyspace_misses = cursor.read_u64(Region::Header)?;
        let data_type = DataType::from_tag(cursor.read_u8(Region::Header)?);

        let header = Self {
            total_size,
            metadata_size,
            data_size,
            key_len,
            field_len,
            access_timestamp,
            keyspace_hits,
            keyspace_misses,
            data_type,
        };
        Ok((header, cursor.position()))
    }

    /// Declared length of the whole envelope.
    #[must_use]
    pub const fn total_size(&self) -> u32 { self.total_size }

    /// Declared length of the metadata section.
    #[must_use]
    pub const fn metadata_size(&self) -> u32 { self.metadata_size }

    /// Declared length of the payload.
    #[must_use]
    pub const fn data_size(&self) -> u32 { self.data_size }

    /// Length of the key bytes.
    #[must_use]
    pub const fn key_len(&self) -> u32 { self.key_len }

    /// Length of the hash field bytes, if the header carried one.
    ///
    /// `Some(0)` is possible on the wire and means no field.
    #[must_use]
    pub const fn field_len(&self) -> Option<u32> { self.field_len }

    /// Raw access timestamp in seconds since the Unix epoch.
    #[must_use]
    pub const fn access_timestamp(&self) -> u64 { self.access_timestamp }

    /// Server keyspace hit counter.
    #[must_use]
    pub const fn keyspace_hits(&self) -> u64 { self.keyspace_hits }

    /// Server keyspace miss counter.
    #[must_use]
    pub const fn keyspace_misses(&self) -> u64 { self.keyspace_misses }

    /// Type of the value that was read.
    #[must_use]
    pub const fn data_type(&self) -> DataType { self.data_type }
}

/// Whether a field-length word sits at `offset`.
///
/// The format has no flag for this. A field length is assumed present when
/// the declared metadata section leaves room for it on top of the fixed
/// tail. A `metadata_size` smaller than `offset` leaves no room.
#[must_use]
pub(crate) fn field_len_present(metadata_size: u32, offset: usize) -> bool {
    let remaining = usize::try_from(metadata_size)
        .unwrap_or(usize::MAX)
        .saturating_sub(offset);
    remaining >= TAIL_LEN + FIELD_LEN_SIZE
}
