//! Hex input sources.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Return the hex text to decode.
///
/// Uses `hex` when given, otherwise the contents of `input`, otherwise all of
/// `stdin`. The text is returned as read; separators are handled by
/// [`crate::codec::decode_hex`].
pub fn read_hex_input<R: Read>(
    hex: Option<&str>,
    input: Option<&Path>,
    stdin: R,
) -> Result<String> {
    if let Some(hex) = hex {
        return Ok(hex.to_string());
    }

    if let Some(path) = input {
        debug!(path = %path.display(), "reading hex from file");
        return Ok(fs::read_to_string(path)?);
    }

    debug!("reading hex from stdin");
    let mut text = String::new();
    io::BufReader::new(stdin).read_to_string(&mut text)?;
    Ok(text)
}
