//! Command-line argument definitions.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use super::OutputFormat;
use crate::protocol::{Layer, PipelineConfig};

/// Deepest layer to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UntilLayer {
    /// Stop after the Ethernet header
    Ethernet,
    /// Stop after the IPv4 header
    Ipv4,
    /// Decode through TCP (default)
    Tcp,
}

impl From<UntilLayer> for Layer {
    fn from(value: UntilLayer) -> Self {
        match value {
            UntilLayer::Ethernet => Layer::Ethernet,
            UntilLayer::Ipv4 => Layer::Ipv4,
            UntilLayer::Tcp => Layer::Tcp,
        }
    }
}

/// Decode a captured Ethernet/IPv4/TCP frame given as hex.
#[derive(Parser, Debug)]
#[command(name = "framedecode")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Frame bytes as hex (whitespace allowed); read from stdin if omitted
    #[arg(value_name = "HEX", conflicts_with = "input")]
    pub hex: Option<String>,

    /// Read hex text from a file
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Deepest layer to decode
    #[arg(long = "until", value_enum, default_value = "tcp")]
    pub until: UntilLayer,

    /// List the built-in protocol parsers
    #[arg(long = "list-protocols")]
    pub list_protocols: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Pipeline settings selected on the command line.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default().with_max_layer(self.until.into())
    }

    /// Check if input should come from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.hex.is_none() && self.input.is_none()
    }
}
