//! framedecode CLI entry point.

use std::io;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use framedecode::cli::{read_hex_input, Args, OutputFormatter};
use framedecode::codec::decode_hex;
use framedecode::protocol::{BuiltinProtocol, DecodePipeline};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    // Handle info-only commands
    if args.list_protocols {
        list_protocols();
        return Ok(());
    }

    let text = read_hex_input(args.hex.as_deref(), args.input.as_deref(), io::stdin().lock())
        .with_context(|| match &args.input {
            Some(path) => format!("Failed to read {}", path.display()),
            None => "Failed to read hex input".to_string(),
        })?;
    let bytes = decode_hex(&text).context("Invalid hex input")?;

    let pipeline = DecodePipeline::with_config(args.pipeline_config());
    let formatter = OutputFormatter::new(args.format);
    let mut stdout = io::stdout().lock();

    match pipeline.decode(&bytes) {
        Ok(decoded) => {
            formatter
                .write(&decoded, &mut stdout)
                .context("Failed to write output")?;
        }
        Err(err) => {
            formatter
                .write_partial(&err, &mut stdout)
                .context("Failed to write output")?;
            bail!("Decoding failed: {}", err.into_error());
        }
    }

    Ok(())
}

/// List the built-in protocol parsers.
fn list_protocols() {
    println!("Built-in Protocol Parsers:");
    println!("{:-<60}", "");

    for protocol in BuiltinProtocol::all() {
        println!("  {} ({})", protocol.display_name(), protocol.name());
        println!("    Layer: {}", protocol.layer());
        println!("    Minimum header: {} bytes", protocol.min_header_len());
        match protocol.selected_by() {
            Some(tag) => println!("    Selected by: {tag}"),
            None => println!("    Selected by: start of frame"),
        }
    }
}
