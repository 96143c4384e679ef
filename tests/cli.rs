//! End-to-end tests for the `readmeta` binary.

use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

use readmeta_testing::{TestResult, string_envelope};
use rstest::rstest;

fn run_decode(input: &[u8], args: &[&str]) -> TestResult<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_readmeta"))
        .arg("decode")
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .ok_or("stdin not captured")?
        .write_all(input)?;
    Ok(child.wait_with_output()?)
}

#[rstest]
#[case::quiet(&[])]
#[case::verbose(&["--verbose"])]
fn decode_failure_is_reported_once(#[case] args: &[&str]) -> TestResult {
    let output = run_decode(b"RDMT\0\0", args)?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert_eq!(
        stderr.matches("malformed envelope header").count(),
        1,
        "stderr={stderr}"
    );
    assert!(
        stderr.contains("error: malformed envelope header: 6 bytes, need at least 16"),
        "stderr={stderr}"
    );
    Ok(())
}

#[rstest]
fn decode_success_prints_report(string_envelope: Vec<u8>) -> TestResult {
    let output = run_decode(&string_envelope, &[])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("key: k"), "stdout={stdout}");
    assert!(stdout.contains("type: string (0)"), "stdout={stdout}");
    Ok(())
}
