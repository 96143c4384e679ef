//! Shared fixtures for `readmeta` tests.
//!
//! Provides sample envelopes, an in-memory [`Fetch`](readmeta::Fetch)
//! implementation, and a serialised log capture handle.
//!
//! ```rust
//! use readmeta::{Decoded, decode};
//! use readmeta_testing::string_envelope;
//!
//! let buf = string_envelope();
//! assert!(matches!(decode(&buf), Ok(Decoded::Envelope(_))));
//! ```

pub mod client;
pub mod fixtures;
pub mod logging;

pub use client::{MemoryClient, MemoryClientError};
pub use fixtures::{hash_envelope, string_envelope};
pub use logging::{LoggerHandle, logger};

/// Result type for fallible tests.
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
