//! Command-line interface module.
//!
//! This module handles:
//! - Argument parsing via clap
//! - Reading hex input from an argument, a file or stdin
//! - Output formatting of decoded layers (table, CSV, JSON)

mod args;
mod input;
mod output;

pub use args::{Args, UntilLayer};
pub use input::read_hex_input;
pub use output::{OutputFormat, OutputFormatter};
