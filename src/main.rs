//! `readmeta` command line tool.
//!
//! Decodes envelope buffers captured from a store, or prints fixture
//! envelopes.

mod cli;

use std::{
    fs,
    io::{self, Read},
    path::Path,
    process::ExitCode,
};

use clap::Parser;
use cli::{Cli, Command, Format};
use readmeta::{DataType, OutputFormat, decode, envelope::EnvelopeBuilder};
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn read_input(path: Option<&Path>, hex: bool) -> Result<Vec<u8>, BoxError> {
    let raw = match path {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };
    if !hex {
        return Ok(raw);
    }
    let text: String = String::from_utf8(raw)?
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    Ok(hex::decode(text)?)
}

fn run(cli: Cli) -> Result<(), BoxError> {
    match cli.command {
        Command::Decode { path, hex, format } => {
            let buf = read_input(path.as_deref(), hex)?;
            tracing::debug!(len = buf.len(), "read input buffer");
            let decoded = decode(&buf)?;
            let format = match format {
                Format::Text => OutputFormat::Text,
                Format::Json => OutputFormat::Json,
            };
            println!("{}", format.render(&decoded)?);
        }
        Command::Encode {
            key,
            field,
            data,
            type_tag,
            timestamp,
            hits,
            misses,
        } => {
            let mut builder = EnvelopeBuilder::new(&key, &data)
                .access_timestamp(timestamp)
                .keyspace_hits(hits)
                .keyspace_misses(misses);
            if let Some(field) = field {
                builder = builder.field(field);
            }
            if let Some(tag) = type_tag {
                builder = builder.data_type(DataType::from_tag(tag));
            }
            println!("{}", hex::encode(builder.build()));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
