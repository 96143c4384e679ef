//! Top-level envelope decoding.

use std::str;

use log::debug;

use super::{
    cursor::WireCursor,
    error::{DecodeError, Region},
    header::EnvelopeHeader,
    sniff::{Sniff, sniff},
};
use crate::metadata::{Decoded, Metadata, Response};

fn decode_text(bytes: &[u8], region: Region) -> Result<String, DecodeError> {
    str::from_utf8(bytes)
        .map(String::from)
        .map_err(|source| DecodeError::InvalidEncoding { region, source })
}

/// Decode a read response that may carry an envelope.
///
/// Buffers without the envelope magic are returned unchanged as
/// [`Decoded::Raw`]. Otherwise the header, key, optional field, and payload
/// are extracted and validated; the payload is kept as opaque bytes.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the magic matches but the envelope is
/// malformed, inconsistent, truncated, or has a key or field that is not
/// valid UTF-8.
///
/// # Examples
///
/// ```
/// use readmeta::{Decoded, decode};
///
/// assert_eq!(decode(b"plain"), Ok(Decoded::Raw(b"plain".to_vec())));
/// ```
pub fn decode(buf: &[u8]) -> Result<Decoded, DecodeError> {
    if sniff(buf)? == Sniff::Passthrough {
        return Ok(Decoded::Raw(buf.to_vec()));
    }

    let (header, offset) = EnvelopeHeader::parse(buf)?;
    let mut cursor = WireCursor::at(buf, offset);

    let key = decode_text(cursor.take(header.key_len(), Region::Key)?, Region::Key)?;
    let field = match header.field_len() {
        Some(len) if len > 0 => Some(decode_text(
            cursor.take(len, Region::Field)?,
            Region::Field,
        )?),
        _ => None,
    };
    let data = cursor.take(header.data_size(), Region::Payload)?.to_vec();

    debug!(
        "decoded envelope key={key:?} field={field:?} type={} data_size={}",
        header.data_type(),
        data.len()
    );
    let metadata = Metadata::from_header(&header, key, field);
    Ok(Decoded::Envelope(Response::new(data, metadata)))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        DecodeErrorKind,
        envelope::{EnvelopeBuilder, SizeField},
        metadata::DataType,
    };

    fn response(buf: &[u8]) -> Response {
        decode(buf)
            .expect("decode succeeds")
            .into_response()
            .expect("buffer is an envelope")
    }

    #[test]
    fn decodes_string_read() {
        let buf = EnvelopeBuilder::new("k", "v").build();
        let response = response(&buf);
        assert_eq!(response.data(), b"v");
        let metadata = response.metadata();
        assert_eq!(metadata.key(), "k");
        assert_eq!(metadata.field(), None);
        assert_eq!(metadata.data_type(), DataType::String);
        assert_eq!(metadata.data_size(), 1);
        assert_eq!(metadata.total_size() as usize, buf.len());
        assert_eq!(metadata.metadata_size(), 49);
    }

    #[test]
    fn decodes_hash_read() {
        let buf = EnvelopeBuilder::new("h", "val").field("f1").build();
        let response = response(&buf);
        assert_eq!(response.metadata().field(), Some("f1"));
        assert_eq!(response.metadata().data_type(), DataType::Hash);
        assert_eq!(response.data(), b"val");
    }

    #[test]
    fn zero_length_field_is_absent() {
        let buf = EnvelopeBuilder::new("h", "val").field("").build();
        assert_eq!(response(&buf).metadata().field(), None);
    }

    #[test]
    fn empty_key_and_payload_decode() {
        let buf = EnvelopeBuilder::new("", "").build();
        let response = response(&buf);
        assert_eq!(response.metadata().key(), "");
        assert!(response.data().is_empty());
    }

    #[rstest]
    #[case::key(EnvelopeBuilder::new([0xff_u8, 0xfe], "v"), Region::Key)]
    #[case::field(EnvelopeBuilder::new("h", "v").field([0xc3_u8, 0x28]), Region::Field)]
    fn invalid_text_is_rejected(#[case] builder: EnvelopeBuilder, #[case] expected: Region) {
        let err = decode(&builder.build()).expect_err("text must be rejected");
        assert!(matches!(err, DecodeError::InvalidEncoding { region, .. } if region == expected));
    }

    #[test]
    fn invalid_payload_bytes_are_kept() {
        let buf = EnvelopeBuilder::new("k", [0xff_u8, 0x00, 0xfe]).build();
        assert_eq!(response(&buf).data(), &[0xff, 0x00, 0xfe]);
    }

    #[test]
    fn dropping_the_last_byte_fails() {
        let mut buf = EnvelopeBuilder::new("k", "v").build();
        buf.pop();
        let err = decode(&buf).expect_err("truncated buffer must fail");
        assert!(matches!(
            err,
            DecodeError::SizeMismatch { what: SizeField::Total, .. }
        ));
    }

    #[test]
    fn key_length_past_the_end_is_truncated() {
        // Claim a longer payload in both size fields so the key overruns.
        let mut buf = EnvelopeBuilder::new("key", "v").build();
        buf[16..20].copy_from_slice(&1000u32.to_be_bytes());
        let err = decode(&buf).expect_err("key overruns the buffer");
        assert_eq!(err.kind(), DecodeErrorKind::Truncated);
        assert!(matches!(err, DecodeError::Truncated { region: Region::Key, offset: 49, .. }));
    }

    #[test]
    fn payload_past_the_end_is_truncated() {
        let mut buf = EnvelopeBuilder::new("k", "value").build();
        buf[12..16].copy_from_slice(&6u32.to_be_bytes());
        buf[20..24].copy_from_slice(&6u32.to_be_bytes());
        let err = decode(&buf).expect_err("payload overruns the buffer");
        assert!(matches!(
            err,
            DecodeError::Truncated { region: Region::Payload, needed: 6, available: 5, .. }
        ));
    }

    #[test]
    fn string_read_with_oversized_metadata_is_misread_as_hash_layout() {
        // Without a flag byte, a string envelope whose metadata_size leaves
        // room for a field-length word is parsed as if it had one.
        let buf = EnvelopeBuilder::new("k", "v")
            .metadata_size_override(53)
            .build();
        let err = decode(&buf).expect_err("misaligned header");
        assert_eq!(err.kind(), DecodeErrorKind::SizeMismatch);
    }

    #[test]
    fn decoding_is_repeatable() {
        let buf = EnvelopeBuilder::new("h", "val").field("f1").keyspace_hits(9).build();
        assert_eq!(decode(&buf), decode(&buf));
    }
}
