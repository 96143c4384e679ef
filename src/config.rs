//! Output configuration for the `readmeta` tool.
//!
//! The decoder itself has no configuration; these types only control how a
//! caller renders a [`Decoded`] value.

use std::fmt;

use crate::metadata::{Decoded, Response};

/// Rendering formats supported by the tool.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report.
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Render a decode result.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if JSON serialisation fails.
    pub fn render(self, decoded: &Decoded) -> Result<String, serde_json::Error> {
        match (self, decoded) {
            (OutputFormat::Text, Decoded::Raw(bytes)) => {
                Ok(format!("raw: {}\n", String::from_utf8_lossy(bytes)))
            }
            (OutputFormat::Text, Decoded::Envelope(response)) => Ok(TextReport(response).to_string()),
            (OutputFormat::Json, Decoded::Raw(bytes)) => serde_json::to_string_pretty(
                &serde_json::json!({ "raw": String::from_utf8_lossy(bytes) }),
            ),
            (OutputFormat::Json, Decoded::Envelope(response)) => {
                serde_json::to_string_pretty(response)
            }
        }
    }
}

struct TextReport<'a>(&'a Response);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metadata = self.0.metadata();
        writeln!(f, "data: {}", self.0.data_lossy())?;
        writeln!(f, "key: {}", metadata.key())?;
        if let Some(field) = metadata.field() {
            writeln!(f, "field: {field}")?;
        }
        writeln!(
            f,
            "type: {} ({})",
            metadata.data_type(),
            metadata.data_type().tag()
        )?;
        writeln!(f, "data size: {} bytes", metadata.data_size())?;
        writeln!(
            f,
            "access time: {} ({})",
            metadata.access_time_formatted(),
            metadata.access_timestamp()
        )?;
        writeln!(f, "keyspace hits: {}", metadata.keyspace_hits())?;
        writeln!(f, "keyspace misses: {}", metadata.keyspace_misses())?;
        writeln!(f, "total size: {} bytes", metadata.total_size())?;
        writeln!(f, "metadata size: {} bytes", metadata.metadata_size())
    }
}
