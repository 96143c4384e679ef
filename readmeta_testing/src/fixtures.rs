//! Sample envelopes matching the reads a store produces.

use readmeta::envelope::EnvelopeBuilder;
use rstest::fixture;

/// Access timestamp shared by the sample envelopes.
pub const SAMPLE_TIMESTAMP: u64 = 1_700_000_000;

/// `GET k` returning `v`.
#[rustfmt::skip]
#[fixture]
pub fn string_envelope() -> Vec<u8> {
    EnvelopeBuilder::new("k", "v")
        .access_timestamp(SAMPLE_TIMESTAMP)
        .keyspace_hits(10)
        .keyspace_misses(2)
        .build()
}

/// `HGET h f1` returning `val`.
#[rustfmt::skip]
#[fixture]
pub fn hash_envelope() -> Vec<u8> {
    EnvelopeBuilder::new("h", "val")
        .field("f1")
        .access_timestamp(SAMPLE_TIMESTAMP)
        .keyspace_hits(11)
        .keyspace_misses(2)
        .build()
}
