//! Reading through a store client with envelope detection.
//!
//! The crate ships no client. Anything that can issue `GET` and `HGET` and
//! report whether the reply was text or raw bytes can implement [`Fetch`];
//! the helpers here run [`decode`] over byte replies and hand everything else
//! back untouched.

use thiserror::Error;

use crate::{
    envelope::{DecodeError, decode},
    metadata::{Decoded, Response},
};

/// Reply shape produced by a store client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// The key or field does not exist.
    Nil,
    /// A value the client already decoded as text.
    Text(String),
    /// A value returned as raw bytes.
    Bytes(Vec<u8>),
}

/// Minimal read interface of a store client.
pub trait Fetch {
    /// Client failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read a string key.
    ///
    /// # Errors
    ///
    /// Returns the client's error if the read fails.
    fn get(&mut self, key: &str) -> Result<Reply, Self::Error>;

    /// Read a field of a hash key.
    ///
    /// # Errors
    ///
    /// Returns the client's error if the read fails.
    fn hget(&mut self, key: &str, field: &str) -> Result<Reply, Self::Error>;
}

/// Outcome of a read through [`get_with_metadata`] or [`hget_with_metadata`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fetched {
    /// The reply carried an envelope.
    Envelope(Response),
    /// The reply was an ordinary value, returned as the client produced it.
    Plain(Reply),
}

/// Errors from a read with envelope detection.
#[derive(Debug, Error)]
pub enum FetchError<E: std::error::Error + 'static> {
    /// The client failed.
    #[error("read failed: {0}")]
    Client(#[source] E),
    /// The reply carried the envelope magic but could not be decoded.
    #[error("read reply is a corrupt envelope: {0}")]
    Decode(#[from] DecodeError),
}

fn detect<E: std::error::Error + 'static>(reply: Reply) -> Result<Fetched, FetchError<E>> {
    match reply {
        Reply::Bytes(bytes) => match decode(&bytes)? {
            Decoded::Envelope(response) => Ok(Fetched::Envelope(response)),
            Decoded::Raw(_) => Ok(Fetched::Plain(Reply::Bytes(bytes))),
        },
        other => Ok(Fetched::Plain(other)),
    }
}

/// `GET key`, decoding the reply if it carries an envelope.
///
/// # Errors
///
/// Returns [`FetchError::Client`] if the read fails and
/// [`FetchError::Decode`] if the reply is a corrupt envelope.
pub fn get_with_metadata<F: Fetch>(
    client: &mut F,
    key: &str,
) -> Result<Fetched, FetchError<F::Error>> {
    detect(client.get(key).map_err(FetchError::Client)?)
}

/// `HGET key field`, decoding the reply if it carries an envelope.
///
/// # Errors
///
/// Returns [`FetchError::Client`] if the read fails and
/// [`FetchError::Decode`] if the reply is a corrupt envelope.
pub fn hget_with_metadata<F: Fetch>(
    client: &mut F,
    key: &str,
    field: &str,
) -> Result<Fetched, FetchError<F::Error>> {
    detect(client.hget(key, field).map_err(FetchError::Client)?)
}
