//! Property tests for envelope decoding.

use proptest::{collection::vec, prelude::*};
use readmeta::{DataType, DecodeErrorKind, Decoded, decode, envelope::EnvelopeBuilder};

fn non_magic_buffer() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        vec(any::<u8>(), 0..4),
        vec(any::<u8>(), 4..128).prop_filter("must not start with magic", |buf| {
            !buf.starts_with(b"RDMT")
        }),
    ]
}

prop_compose! {
    fn envelope()(
        key in "[a-z:0-9]{0,16}",
        field in proptest::option::of("[a-z0-9]{1,8}"),
        data in vec(any::<u8>(), 0..64),
        tag in 0u8..=5,
        timestamp in any::<u64>(),
        hits in any::<u64>(),
        misses in any::<u64>(),
    ) -> (EnvelopeBuilder, String, Option<String>, Vec<u8>) {
        let mut builder = EnvelopeBuilder::new(&key, &data)
            .access_timestamp(timestamp)
            .keyspace_hits(hits)
            .keyspace_misses(misses);
        if let Some(field) = &field {
            builder = builder.field(field);
        } else {
            builder = builder.data_type(DataType::from_tag(tag));
        }
        (builder, key, field, data)
    }
}

proptest! {
    #[test]
    fn non_envelopes_pass_through(buf in non_magic_buffer()) {
        prop_assert_eq!(decode(&buf), Ok(Decoded::Raw(buf.clone())));
    }

    #[test]
    fn built_envelopes_decode((builder, key, field, data) in envelope()) {
        let buf = builder.build();
        let response = decode(&buf).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let response = response.into_response().ok_or_else(|| TestCaseError::fail("raw"))?;
        prop_assert_eq!(response.metadata().key(), key.as_str());
        prop_assert_eq!(response.metadata().field(), field.as_deref());
        prop_assert_eq!(response.data(), data.as_slice());
        prop_assert_eq!(response.metadata().total_size() as usize, buf.len());
    }

    #[test]
    fn truncation_never_decodes((builder, ..) in envelope(), cut in 1usize..64) {
        let mut buf = builder.build();
        let len = buf.len().saturating_sub(cut).max(4);
        buf.truncate(len);
        let kind = decode(&buf).map(|_| ()).map_err(|e| e.kind());
        prop_assert!(matches!(
            kind,
            Err(DecodeErrorKind::SizeMismatch | DecodeErrorKind::Truncated | DecodeErrorKind::MalformedHeader)
        ));
    }

    #[test]
    fn arbitrary_magic_buffers_never_panic(tail in vec(any::<u8>(), 0..96)) {
        let mut buf = b"RDMT".to_vec();
        buf.extend_from_slice(&tail);
        let first = decode(&buf);
        prop_assert_eq!(first, decode(&buf));
    }
}
