//! In-memory store client.

use std::collections::HashMap;

use readmeta::{Fetch, Reply};
use thiserror::Error;

/// Failure injected into [`MemoryClient`] reads.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("memory client failure: {0}")]
pub struct MemoryClientError(pub String);

/// [`Fetch`] implementation backed by maps of canned replies.
///
/// Missing keys read as [`Reply::Nil`]. Every read is recorded so tests can
/// check which commands were issued.
#[derive(Debug, Default)]
pub struct MemoryClient {
    strings: HashMap<String, Reply>,
    hashes: HashMap<(String, String), Reply>,
    failure: Option<MemoryClientError>,
    commands: Vec<String>,
}

impl MemoryClient {
    /// Create an empty client.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Answer `GET key` with `reply`.
    #[must_use]
    pub fn with_string(mut self, key: &str, reply: Reply) -> Self {
        self.strings.insert(key.to_owned(), reply);
        self
    }

    /// Answer `HGET key field` with `reply`.
    #[must_use]
    pub fn with_hash(mut self, key: &str, field: &str, reply: Reply) -> Self {
        self.hashes.insert((key.to_owned(), field.to_owned()), reply);
        self
    }

    /// Fail every read with `message`.
    #[must_use]
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(MemoryClientError(message.to_owned()));
        self
    }

    /// Commands issued so far, in order.
    #[must_use]
    pub fn commands(&self) -> &[String] { &self.commands }

    fn answer(&self, reply: Option<&Reply>) -> Result<Reply, MemoryClientError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(reply.cloned().unwrap_or(Reply::Nil)),
        }
    }
}

impl Fetch for MemoryClient {
    type Error = MemoryClientError;

    fn get(&mut self, key: &str) -> Result<Reply, Self::Error> {
        self.commands.push(format!("GET {key}"));
        self.answer(self.strings.get(key))
    }

    fn hget(&mut self, key: &str, field: &str) -> Result<Reply, Self::Error> {
        self.commands.push(format!("HGET {key} {field}"));
        self.answer(self.hashes.get(&(key.to_owned(), field.to_owned())))
    }
}
