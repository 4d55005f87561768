//! Protocol trait and the set of built-in parsers.

use std::fmt;

use super::{EthernetProtocol, Ipv4Protocol, TcpProtocol};
use crate::error::DecodeError;

/// A decodable protocol layer, ordered from the outermost inwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Ethernet II link layer.
    Ethernet,
    /// IPv4 internet layer.
    Ipv4,
    /// TCP transport layer.
    Tcp,
}

impl Layer {
    /// Human-readable layer name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Ethernet => "Ethernet",
            Layer::Ipv4 => "IPv4",
            Layer::Tcp => "TCP",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core trait all protocol parsers implement.
///
/// Each parser turns a borrowed buffer into a header record whose payload is a
/// sub-slice of that same buffer. New layers (UDP, ICMP, ...) plug in by
/// implementing this trait and being selected from the enclosing layer's tag.
pub trait Protocol: Send + Sync {
    /// Decoded header record, borrowing the input buffer.
    type Header<'a>;

    /// Unique identifier for this protocol (e.g., "tcp").
    fn name(&self) -> &'static str;

    /// Human-readable display name.
    fn display_name(&self) -> &'static str {
        self.name()
    }

    /// The layer this parser decodes.
    fn layer(&self) -> Layer;

    /// Fewest bytes `parse` accepts.
    fn min_header_len(&self) -> usize;

    /// Parse a header and slice out its payload.
    fn parse<'a>(&self, data: &'a [u8]) -> Result<Self::Header<'a>, DecodeError>;
}

/// Enum of all built-in protocol parsers.
///
/// Used where the parsers are listed rather than driven, such as the CLI's
/// `--list-protocols`.
#[derive(Debug, Clone, Copy)]
pub enum BuiltinProtocol {
    Ethernet(EthernetProtocol),
    Ipv4(Ipv4Protocol),
    Tcp(TcpProtocol),
}

impl BuiltinProtocol {
    /// All built-in parsers, outermost first.
    pub fn all() -> [BuiltinProtocol; 3] {
        [
            BuiltinProtocol::Ethernet(EthernetProtocol),
            BuiltinProtocol::Ipv4(Ipv4Protocol),
            BuiltinProtocol::Tcp(TcpProtocol),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinProtocol::Ethernet(p) => p.name(),
            BuiltinProtocol::Ipv4(p) => p.name(),
            BuiltinProtocol::Tcp(p) => p.name(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BuiltinProtocol::Ethernet(p) => p.display_name(),
            BuiltinProtocol::Ipv4(p) => p.display_name(),
            BuiltinProtocol::Tcp(p) => p.display_name(),
        }
    }

    pub fn layer(&self) -> Layer {
        match self {
            BuiltinProtocol::Ethernet(p) => p.layer(),
            BuiltinProtocol::Ipv4(p) => p.layer(),
            BuiltinProtocol::Tcp(p) => p.layer(),
        }
    }

    pub fn min_header_len(&self) -> usize {
        match self {
            BuiltinProtocol::Ethernet(p) => p.min_header_len(),
            BuiltinProtocol::Ipv4(p) => p.min_header_len(),
            BuiltinProtocol::Tcp(p) => p.min_header_len(),
        }
    }

    /// How the enclosing layer selects this parser, if it is not the root.
    pub fn selected_by(&self) -> Option<&'static str> {
        match self {
            BuiltinProtocol::Ethernet(_) => None,
            BuiltinProtocol::Ipv4(_) => Some("ethertype 0x0800"),
            BuiltinProtocol::Tcp(_) => Some("ip protocol 6"),
        }
    }
}
