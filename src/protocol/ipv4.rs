//! IPv4 protocol parser.

use std::net::Ipv4Addr;

use tracing::{debug, warn};

use super::{Layer, Protocol};
use crate::codec::{extract_bits, read_array, read_be};
use crate::error::DecodeError;

/// Size of the fixed part of the IPv4 header.
pub const MIN_HEADER_LEN: usize = 20;

/// Well-known IP protocol numbers.
pub mod ip_protocol {
    pub const ICMP: u8 = 1;
    pub const IGMP: u8 = 2;
    pub const IPIP: u8 = 4;
    pub const TCP: u8 = 6;
    pub const UDP: u8 = 17;
    pub const IPV6: u8 = 41;
    pub const GRE: u8 = 47;
    pub const ESP: u8 = 50;
    pub const AH: u8 = 51;
    pub const OSPF: u8 = 89;
    pub const SCTP: u8 = 132;

    /// Short name for a protocol number, if it is one we know.
    pub fn name(value: u8) -> Option<&'static str> {
        Some(match value {
            ICMP => "ICMP",
            IGMP => "IGMP",
            IPIP => "IP-in-IP",
            TCP => "TCP",
            UDP => "UDP",
            IPV6 => "IPv6",
            GRE => "GRE",
            ESP => "ESP",
            AH => "AH",
            OSPF => "OSPF",
            SCTP => "SCTP",
            _ => return None,
        })
    }
}

/// Bits of the 3-bit flags field.
pub mod flags {
    pub const RESERVED: u8 = 0b100;
    pub const DONT_FRAGMENT: u8 = 0b010;
    pub const MORE_FRAGMENTS: u8 = 0b001;
}

/// A decoded IPv4 packet.
///
/// Checksum and total length are reported as found; neither is verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Packet<'a> {
    pub version: u8,
    /// Header length in 32-bit words (IHL).
    pub ihl: u8,
    pub dscp: u8,
    pub ecn: u8,
    pub total_length: u16,
    pub identification: u16,
    /// Reserved, DF and MF bits, most significant first.
    pub flags: u8,
    /// Fragment offset in 8-byte units.
    pub fragment_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub header_checksum: u16,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    /// Bytes from `ihl * 4` onwards, empty if that is past the buffer.
    pub payload: &'a [u8],
    options: &'a [u8],
}

impl<'a> Ipv4Packet<'a> {
    /// Header length in bytes as declared by IHL.
    pub fn header_len(&self) -> usize {
        self.ihl as usize * 4
    }

    pub fn dont_fragment(&self) -> bool {
        self.flags & flags::DONT_FRAGMENT != 0
    }

    pub fn more_fragments(&self) -> bool {
        self.flags & flags::MORE_FRAGMENTS != 0
    }

    /// Whether this packet is one piece of a fragmented datagram.
    pub fn is_fragment(&self) -> bool {
        self.more_fragments() || self.fragment_offset != 0
    }

    /// Raw option bytes between the fixed header and the payload.
    ///
    /// Only the bytes present in the buffer are returned; they are not parsed.
    pub fn options(&self) -> &'a [u8] {
        self.options
    }
}

/// IPv4 protocol parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv4Protocol;

impl Protocol for Ipv4Protocol {
    type Header<'a> = Ipv4Packet<'a>;

    fn name(&self) -> &'static str {
        "ipv4"
    }

    fn display_name(&self) -> &'static str {
        "IPv4"
    }

    fn layer(&self) -> Layer {
        Layer::Ipv4
    }

    fn min_header_len(&self) -> usize {
        MIN_HEADER_LEN
    }

    fn parse<'a>(&self, data: &'a [u8]) -> Result<Ipv4Packet<'a>, DecodeError> {
        if data.len() < MIN_HEADER_LEN {
            return Err(DecodeError::TruncatedPacket {
                needed: MIN_HEADER_LEN,
                have: data.len(),
            });
        }

        // Every field comes from the fixed 20 bytes; IHL only moves the payload.
        let version_ihl = read_be::<u8>(data, 0)? as u32;
        let tos = read_be::<u8>(data, 1)? as u32;
        let flags_fragment = read_be::<u16>(data, 6)? as u32;

        let version = extract_bits(version_ihl, 7, 4) as u8;
        let ihl = extract_bits(version_ihl, 3, 0) as u8;

        if version != 4 {
            warn!(version, "IPv4 header carries unexpected version");
        }
        if (ihl as usize) * 4 < MIN_HEADER_LEN {
            warn!(ihl, "IPv4 IHL below minimum, payload overlaps fixed header");
        }

        let header_len = ihl as usize * 4;
        let payload = data.get(header_len..).unwrap_or(&[]);
        let options = data
            .get(MIN_HEADER_LEN..header_len.min(data.len()))
            .unwrap_or(&[]);

        let packet = Ipv4Packet {
            version,
            ihl,
            dscp: extract_bits(tos, 7, 2) as u8,
            ecn: extract_bits(tos, 1, 0) as u8,
            total_length: read_be(data, 2)?,
            identification: read_be(data, 4)?,
            flags: extract_bits(flags_fragment, 15, 13) as u8,
            fragment_offset: extract_bits(flags_fragment, 12, 0) as u16,
            ttl: read_be(data, 8)?,
            protocol: read_be(data, 9)?,
            header_checksum: read_be(data, 10)?,
            source: Ipv4Addr::from(read_array::<4>(data, 12)?),
            destination: Ipv4Addr::from(read_array::<4>(data, 16)?),
            payload,
            options,
        };

        debug!(
            ihl = packet.ihl,
            protocol = packet.protocol,
            payload_len = packet.payload.len(),
            "decoded ipv4 packet"
        );

        Ok(packet)
    }
}
