//! Command line interface for the `readmeta` binary.
//!
//! Kept free of crate imports so the build script can render a man page
//! from it.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command line arguments for the `readmeta` binary.
#[derive(Debug, Parser)]
#[command(
    name = "readmeta",
    version,
    about = "Decode read-response metadata envelopes"
)]
pub struct Cli {
    /// Log decoder activity at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Tool subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode a buffer from a file or stdin.
    Decode {
        /// Input file; stdin when omitted.
        path: Option<PathBuf>,
        /// Treat the input as hex text rather than raw bytes.
        #[arg(long)]
        hex: bool,
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print a hex-encoded envelope for use as a fixture.
    Encode {
        /// Key name.
        #[arg(long)]
        key: String,
        /// Hash field name; also sets the type tag to hash.
        #[arg(long)]
        field: Option<String>,
        /// Payload text.
        #[arg(long)]
        data: String,
        /// Numeric type tag, overriding the default.
        #[arg(long = "type")]
        type_tag: Option<u8>,
        /// Access timestamp in seconds since the Unix epoch.
        #[arg(long, default_value_t = 0)]
        timestamp: u64,
        /// Keyspace hit counter.
        #[arg(long, default_value_t = 0)]
        hits: u64,
        /// Keyspace miss counter.
        #[arg(long, default_value_t = 0)]
        misses: u64,
    },
}

/// Output format accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable report.
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command, Format};

    #[test]
    fn parses_decode_options() {
        let cli = Cli::parse_from(["readmeta", "decode", "--hex", "-f", "json", "buf.hex"]);
        match cli.command {
            Command::Decode { path, hex, format } => {
                assert_eq!(path.as_deref(), Some("buf.hex".as_ref()));
                assert!(hex);
                assert_eq!(format, Format::Json);
            }
            Command::Encode { .. } => panic!("expected decode"),
        }
    }

    #[test]
    fn parses_encode_options() {
        let cli = Cli::parse_from([
            "readmeta", "-v", "encode", "--key", "h", "--field", "f1", "--data", "val", "--hits",
            "3",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Command::Encode {
                key,
                field,
                data,
                hits,
                type_tag,
                ..
            } => {
                assert_eq!(key, "h");
                assert_eq!(field.as_deref(), Some("f1"));
                assert_eq!(data, "val");
                assert_eq!(hits, 3);
                assert_eq!(type_tag, None);
            }
            Command::Decode { .. } => panic!("expected encode"),
        }
    }
}
