#![doc(html_root_url = "https://docs.rs/readmeta/latest")]
//! Public API for the `readmeta` library.
//!
//! Decodes the metadata envelope a key-value store may place in front of a
//! read response. [`decode`] inspects any reply buffer: plain values come
//! back unchanged as [`Decoded::Raw`], envelopes are parsed into a
//! [`Response`] carrying the payload and its [`Metadata`].

pub mod config;
pub mod envelope;
pub mod fetch;
pub mod metadata;

pub use config::OutputFormat;
pub use envelope::{DecodeError, DecodeErrorKind, decode};
pub use fetch::{Fetch, FetchError, Fetched, Reply, get_with_metadata, hget_with_metadata};
pub use metadata::{DataType, Decoded, Metadata, Response};
