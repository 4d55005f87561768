//! Network address and field value formatting.
//!
//! Provides functions to:
//! - Format hardware and network addresses as their canonical strings
//! - Render packed header fields as fixed-width hex and bit strings

use std::net::Ipv4Addr;

/// Format 6 bytes as a MAC address string in colon-separated uppercase hex.
///
/// # Example
///
/// ```
/// use framedecode::format::format_mac;
///
/// let bytes = [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];
/// assert_eq!(format_mac(&bytes), "AA:BB:CC:DD:EE:FF");
/// ```
pub fn format_mac(bytes: &[u8; 6]) -> String {
    format!(
        "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5]
    )
}

/// Format 4 bytes as an IPv4 address string in dotted-decimal notation.
///
/// # Example
///
/// ```
/// use framedecode::format::format_ipv4;
///
/// assert_eq!(format_ipv4(&[192, 168, 1, 1]), "192.168.1.1");
/// ```
pub fn format_ipv4(bytes: &[u8; 4]) -> String {
    Ipv4Addr::from(*bytes).to_string()
}

/// Format `value` as `0x`-prefixed hex padded to `bits` worth of digits.
///
/// # Example
///
/// ```
/// use framedecode::format::format_hex;
///
/// assert_eq!(format_hex(0x0800, 16), "0x0800");
/// assert_eq!(format_hex(5, 4), "0x5");
/// ```
pub fn format_hex(value: u32, bits: u32) -> String {
    let digits = bits.div_ceil(4).max(1) as usize;
    format!("0x{value:0digits$X}")
}

/// Format the low `bits` bits of `value` as a zero-padded bit string.
///
/// # Example
///
/// ```
/// use framedecode::format::format_bits;
///
/// assert_eq!(format_bits(0b010, 3), "010");
/// assert_eq!(format_bits(0x12, 6), "010010");
/// ```
pub fn format_bits(value: u32, bits: u32) -> String {
    let width = bits as usize;
    let masked = if bits >= 32 {
        value
    } else {
        value & ((1u32 << bits) - 1)
    };
    format!("{masked:0width$b}")
}
