//! Byte-level helpers shared by the protocol parsers.
//!
//! - [`read_be`] / [`read_array`] - bounds-checked big-endian field reads
//! - [`extract_bits`] - shift-and-mask access to packed bit fields
//! - [`decode_hex`] - hex text to bytes
//!
//! Address rendering lives in [`crate::format`] and is re-exported here so the
//! whole codec surface is reachable from one place.

mod bits;
mod hex;

pub use self::bits::{extract_bits, read_array, read_be, BigEndian};
pub use self::hex::decode_hex;
pub use crate::format::{format_ipv4, format_mac};
