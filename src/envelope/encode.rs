//! Envelope construction for fixtures and tooling.
//!
//! The store is the only real producer of envelopes; this builder exists so
//! tests and the command line tool can produce byte-exact samples. It writes
//! a `metadata_size` consistent with the layout it emits, so the field-length
//! probe in the header reader resolves
//! the way the store intends.

use bytes::{BufMut, BytesMut};

use super::{FIELD_LEN_SIZE, MAGIC, PREFIX_LEN, TAIL_LEN};
use crate::metadata::DataType;

fn wire_len(len: usize) -> u32 { u32::try_from(len).unwrap_or(u32::MAX) }

/// Builder for envelope buffers.
///
/// # Examples
///
/// ```
/// use readmeta::{DataType, decode, envelope::EnvelopeBuilder};
///
/// let buf = EnvelopeBuilder::new("user:1", "alice").keyspace_hits(4).build();
/// let response = decode(&buf).unwrap().into_response().unwrap();
/// assert_eq!(response.metadata().key(), "user:1");
/// assert_eq!(response.metadata().data_type(), DataType::String);
/// assert_eq!(response.data(), b"alice");
/// ```
#[derive(Clone, Debug)]
pub struct EnvelopeBuilder {
    key: Vec<u8>,
    field: Option<Vec<u8>>,
    data: Vec<u8>,
    data_type: DataType,
    access_timestamp: u64,
    keyspace_hits: u64,
    keyspace_misses: u64,
    total_size: Option<u32>,
    metadata_size: Option<u32>,
    data_size: Option<u32>,
}

impl EnvelopeBuilder {
    /// Start a string-typed envelope for `key` carrying `data`.
    #[must_use]
    pub fn new(key: impl AsRef<[u8]>, data: impl AsRef<[u8]>) -> Self {
        Self {
            key: key.as_ref().to_vec(),
            field: None,
            data: data.as_ref().to_vec(),
            data_type: DataType::String,
            access_timestamp: 0,
            keyspace_hits: 0,
            keyspace_misses: 0,
            total_size: None,
            metadata_size: None,
            data_size: None,
        }
    }

    /// Attach a hash field name and switch the type tag to hash.
    ///
    /// An empty name still writes the field-length word, set to zero.
    #[must_use]
    pub fn field(mut self, field: impl AsRef<[u8]>) -> Self {
        self.field = Some(field.as_ref().to_vec());
        self.data_type = DataType::Hash;
        self
    }

    /// Set the type tag.
    #[must_use]
    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    /// Set the access timestamp in seconds since the Unix epoch.
    #[must_use]
    pub fn access_timestamp(mut self, secs: u64) -> Self {
        self.access_timestamp = secs;
        self
    }

    /// Set the keyspace hit counter.
    #[must_use]
    pub fn keyspace_hits(mut self, hits: u64) -> Self {
        self.keyspace_hits = hits;
        self
    }

    /// Set the keyspace miss counter.
    #[must_use]
    pub fn keyspace_misses(mut self, misses: u64) -> Self {
        self.keyspace_misses = misses;
        self
    }

    /// Write `total_size` verbatim instead of the real buffer length.
    #[must_use]
    pub fn total_size_override(mut self, total_size: u32) -> Self {
        self.total_size = Some(total_size);
        self
    }

    /// Write `metadata_size` verbatim instead of the computed header length.
    #[must_use]
    pub fn metadata_size_override(mut self, metadata_size: u32) -> Self {
        self.metadata_size = Some(metadata_size);
        self
    }

    /// Write the header's `data_size` verbatim; `data_len` stays truthful.
    #[must_use]
    pub fn data_size_override(mut self, data_size: u32) -> Self {
        self.data_size = Some(data_size);
        self
    }

    /// Length of the header this builder will emit.
    #[must_use]
    pub fn metadata_len(&self) -> usize {
        let field_word = if self.field.is_some() { FIELD_LEN_SIZE } else { 0 };
        PREFIX_LEN + field_word + TAIL_LEN
    }

    /// Serialise the envelope.
    ///
    /// Lengths that do not fit in a `u32` saturate, which yields a buffer the
    /// decoder rejects.
    #[must_use]
    pub fn build(&self) -> Vec<u8> {
        let field = self.field.as_deref();
        let metadata_len = self.metadata_len();
        let total_len =
            metadata_len + self.key.len() + field.map_or(0, <[u8]>::len) + self.data.len();
        let data_len = wire_len(self.data.len());

        let mut buf = BytesMut::with_capacity(total_len);
        buf.put_slice(MAGIC);
        buf.put_u32(self.total_size.unwrap_or_else(|| wire_len(total_len)));
        buf.put_u32(self.metadata_size.unwrap_or_else(|| wire_len(metadata_len)));
        buf.put_u32(self.data_size.unwrap_or(data_len));
        buf.put_u32(wire_len(self.key.len()));
        if let Some(field) = field {
            buf.put_u32(wire_len(field.len()));
        }
        buf.put_u32(data_len);
        buf.put_u64(self.access_timestamp);
        buf.put_u64(self.keyspace_hits);
        buf.put_u64(self.keyspace_misses);
        buf.put_u8(self.data_type.tag());
        buf.put_slice(&self.key);
        if let Some(field) = field {
            buf.put_slice(field);
        }
        buf.put_slice(&self.data);
        buf.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_envelope_layout() {
        let buf = EnvelopeBuilder::new("k", "v")
            .access_timestamp(0x0102_0304_0506_0708)
            .build();
        assert_eq!(buf.len(), 51);
        assert_eq!(&buf[..4], b"RDMT");
        assert_eq!(&buf[4..8], &51u32.to_be_bytes());
        assert_eq!(&buf[8..12], &49u32.to_be_bytes());
        assert_eq!(&buf[12..16], &1u32.to_be_bytes());
        assert_eq!(&buf[16..20], &1u32.to_be_bytes());
        assert_eq!(&buf[20..24], &1u32.to_be_bytes());
        assert_eq!(&buf[24..32], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(buf[48], 0);
        assert_eq!(&buf[49..], b"kv");
    }

    #[test]
    fn hash_envelope_carries_field_word() {
        let buf = EnvelopeBuilder::new("h", "val").field("f1").build();
        assert_eq!(buf.len(), 53 + 1 + 2 + 3);
        assert_eq!(&buf[8..12], &53u32.to_be_bytes());
        assert_eq!(&buf[20..24], &2u32.to_be_bytes());
        assert_eq!(buf[52], 1);
        assert_eq!(&buf[53..], b"hf1val");
    }
}
