//! Coverage for the `readmeta_testing` in-memory client and fixtures.

use readmeta::{Fetch, Reply};
use readmeta_testing::{MemoryClient, MemoryClientError, TestResult, hash_envelope};
use rstest::rstest;

#[test]
fn missing_keys_read_as_nil() -> TestResult {
    let mut client = MemoryClient::new();
    assert_eq!(client.get("absent")?, Reply::Nil);
    assert_eq!(client.hget("absent", "f")?, Reply::Nil);
    assert_eq!(client.commands(), ["GET absent", "HGET absent f"]);
    Ok(())
}

#[rstest]
fn canned_hash_reply_is_returned(hash_envelope: Vec<u8>) -> TestResult {
    let mut client =
        MemoryClient::new().with_hash("h", "f1", Reply::Bytes(hash_envelope.clone()));
    assert_eq!(client.hget("h", "f1")?, Reply::Bytes(hash_envelope));
    Ok(())
}

#[test]
fn failing_client_reports_error() {
    let mut client = MemoryClient::new().failing("down");
    assert_eq!(
        client.get("k"),
        Err(MemoryClientError("down".to_owned()))
    );
}
