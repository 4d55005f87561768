//! Value formatting utilities for decoded header fields.
//!
//! Provides formatting functions for displaying decoded values in human-readable form:
//! - MAC addresses (6 bytes -> colon-separated uppercase hex)
//! - IPv4 addresses (4 bytes -> dotted-decimal string)
//! - Packed fields (value + bit width -> hex or bit string)
//!
//! The CLI output formatter builds on these; the decoders themselves keep raw
//! values.

mod address;

pub use address::{format_bits, format_hex, format_ipv4, format_mac};
