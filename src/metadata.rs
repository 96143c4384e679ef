//! Decoded envelope contents.
//!
//! [`Decoded`] is what [`decode`](crate::decode) returns: either the caller's
//! bytes untouched, or a [`Response`] pairing the payload with its
//! [`Metadata`]. All values are built once per decode and never mutated.

use std::{borrow::Cow, fmt};

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

use crate::envelope::EnvelopeHeader;

/// Display format for access times.
pub const ACCESS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Type of the value a read returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Plain string value.
    String,
    /// Hash field value.
    Hash,
    /// List value.
    List,
    /// Set value.
    Set,
    /// Sorted set value.
    SortedSet,
    /// Stream value.
    Stream,
    /// Any other tag, kept verbatim.
    Unrecognized(u8),
}

impl DataType {
    /// Map a wire tag to a type.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            0 => Self::String,
            1 => Self::Hash,
            2 => Self::List,
            3 => Self::Set,
            4 => Self::SortedSet,
            5 => Self::Stream,
            other => Self::Unrecognized(other),
        }
    }

    /// Wire tag for this type.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::String => 0,
            Self::Hash => 1,
            Self::List => 2,
            Self::Set => 3,
            Self::SortedSet => 4,
            Self::Stream => 5,
            Self::Unrecognized(tag) => tag,
        }
    }

    /// Short lowercase name; unrecognised tags are `"unknown"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Hash => "hash",
            Self::List => "list",
            Self::Set => "set",
            Self::SortedSet => "zset",
            Self::Stream => "stream",
            Self::Unrecognized(_) => "unknown",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Provenance and statistics for one read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    key: String,
    field: Option<String>,
    data_type: DataType,
    data_size: u32,
    access_timestamp: u64,
    keyspace_hits: u64,
    keyspace_misses: u64,
    total_size: u32,
    metadata_size: u32,
}

impl Metadata {
    pub(crate) fn from_header(header: &EnvelopeHeader, key: String, field: Option<String>) -> Self {
        Self {
            key,
            field,
            data_type: header.data_type(),
            data_size: header.data_size(),
            access_timestamp: header.access_timestamp(),
            keyspace_hits: header.keyspace_hits(),
            keyspace_misses: header.keyspace_misses(),
            total_size: header.total_size(),
            metadata_size: header.metadata_size(),
        }
    }

    /// Key that was read.
    #[must_use]
    pub fn key(&self) -> &str { &self.key }

    /// Hash field that was read; `None` for every non-hash read.
    #[must_use]
    pub fn field(&self) -> Option<&str> { self.field.as_deref() }

    /// Type of the value.
    #[must_use]
    pub const fn data_type(&self) -> DataType { self.data_type }

    /// Payload length in bytes.
    #[must_use]
    pub const fn data_size(&self) -> u32 { self.data_size }

    /// Last access time in seconds since the Unix epoch.
    #[must_use]
    pub const fn access_timestamp(&self) -> u64 { self.access_timestamp }

    /// Keyspace hits reported by the server.
    #[must_use]
    pub const fn keyspace_hits(&self) -> u64 { self.keyspace_hits }

    /// Keyspace misses reported by the server.
    #[must_use]
    pub const fn keyspace_misses(&self) -> u64 { self.keyspace_misses }

    /// Length of the whole envelope.
    #[must_use]
    pub const fn total_size(&self) -> u32 { self.total_size }

    /// Length of the metadata section.
    #[must_use]
    pub const fn metadata_size(&self) -> u32 { self.metadata_size }

    /// Access time in the local time zone, or `None` if the timestamp is out
    /// of range.
    #[must_use]
    pub fn access_time(&self) -> Option<DateTime<Local>> {
        let secs = i64::try_from(self.access_timestamp).ok()?;
        DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(&Local))
    }

    /// Access time rendered with [`ACCESS_TIME_FORMAT`], or an empty string
    /// if the timestamp is out of range.
    #[must_use]
    pub fn access_time_formatted(&self) -> String {
        self.access_time()
            .map(|time| time.format(ACCESS_TIME_FORMAT).to_string())
            .unwrap_or_default()
    }
}

#[derive(Serialize)]
struct MetadataRecord<'a> {
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
    data_type: DataType,
    data_size: u32,
    access_timestamp: u64,
    access_time: String,
    keyspace_hits: u64,
    keyspace_misses: u64,
    total_size: u32,
    metadata_size: u32,
}

impl<'a> From<&'a Metadata> for MetadataRecord<'a> {
    fn from(metadata: &'a Metadata) -> Self {
        Self {
            key: metadata.key(),
            field: metadata.field(),
            data_type: metadata.data_type,
            data_size: metadata.data_size,
            access_timestamp: metadata.access_timestamp,
            access_time: metadata.access_time_formatted(),
            keyspace_hits: metadata.keyspace_hits,
            keyspace_misses: metadata.keyspace_misses,
            total_size: metadata.total_size,
            metadata_size: metadata.metadata_size,
        }
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MetadataRecord::from(self).serialize(serializer)
    }
}

/// Payload of a read together with its metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    data: Vec<u8>,
    metadata: Metadata,
}

impl Response {
    pub(crate) fn new(data: Vec<u8>, metadata: Metadata) -> Self { Self { data, metadata } }

    /// Raw payload bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] { &self.data }

    /// Metadata describing the read.
    #[must_use]
    pub fn metadata(&self) -> &Metadata { &self.metadata }

    /// Payload as text, replacing invalid UTF-8 with U+FFFD.
    #[must_use]
    pub fn data_lossy(&self) -> Cow<'_, str> { String::from_utf8_lossy(&self.data) }

    /// Split into payload and metadata.
    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, Metadata) { (self.data, self.metadata) }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct ResponseRecord<'a> {
            data: Cow<'a, str>,
            metadata: &'a Metadata,
        }

        ResponseRecord {
            data: self.data_lossy(),
            metadata: &self.metadata,
        }
        .serialize(serializer)
    }
}

/// Result of [`decode`](crate::decode).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoded {
    /// The buffer was not an envelope; these are its bytes, unchanged.
    Raw(Vec<u8>),
    /// The buffer was a well-formed envelope.
    Envelope(Response),
}

impl Decoded {
    /// Whether the buffer carried an envelope.
    #[must_use]
    pub const fn is_envelope(&self) -> bool { matches!(self, Self::Envelope(_)) }

    /// Borrow the response, if any.
    #[must_use]
    pub const fn as_response(&self) -> Option<&Response> {
        match self {
            Self::Envelope(response) => Some(response),
            Self::Raw(_) => None,
        }
    }

    /// Take the response, if any.
    #[must_use]
    pub fn into_response(self) -> Option<Response> {
        match self {
            Self::Envelope(response) => Some(response),
            Self::Raw(_) => None,
        }
    }

    /// The value bytes: the passthrough buffer or the envelope payload.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Raw(bytes) => bytes,
            Self::Envelope(response) => response.data,
        }
    }
}
