//! Ethernet II protocol parser.

use std::fmt;

use tracing::debug;

use super::{Layer, Protocol};
use crate::codec::{read_array, read_be};
use crate::error::DecodeError;
use crate::format::format_mac;

/// Length of an Ethernet II header (two addresses and the EtherType).
pub const HEADER_LEN: usize = 14;

/// Well-known EtherType values (IEEE 802).
pub mod ethertype {
    pub const IPV4: u16 = 0x0800;
    pub const ARP: u16 = 0x0806;
    pub const WAKE_ON_LAN: u16 = 0x0842;
    pub const RARP: u16 = 0x8035;
    pub const VLAN: u16 = 0x8100;
    pub const IPV6: u16 = 0x86DD;
    pub const MPLS: u16 = 0x8847;
    pub const PPPOE_DISCOVERY: u16 = 0x8863;
    pub const PPPOE_SESSION: u16 = 0x8864;
    pub const EAP_OVER_LAN: u16 = 0x888E;
    pub const QINQ: u16 = 0x88A8;
    pub const LOCAL_EXPERIMENTAL_1: u16 = 0x88B5;
    pub const LOCAL_EXPERIMENTAL_2: u16 = 0x88B6;
    pub const LLDP: u16 = 0x88CC;
    pub const PTP: u16 = 0x88F7;

    /// Short name for an EtherType, if it is one we know.
    pub fn name(value: u16) -> Option<&'static str> {
        Some(match value {
            IPV4 => "IPv4",
            ARP => "ARP",
            WAKE_ON_LAN => "Wake-on-LAN",
            RARP => "RARP",
            VLAN => "802.1Q",
            IPV6 => "IPv6",
            MPLS => "MPLS",
            PPPOE_DISCOVERY => "PPPoE Discovery",
            PPPOE_SESSION => "PPPoE Session",
            EAP_OVER_LAN => "EAPOL",
            QINQ => "802.1ad",
            LOCAL_EXPERIMENTAL_1 | LOCAL_EXPERIMENTAL_2 => "Local Experimental",
            LLDP => "LLDP",
            PTP => "PTP",
            _ => return None,
        })
    }
}

/// A 48-bit hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// The broadcast address `FF:FF:FF:FF:FF:FF`.
    pub const BROADCAST: MacAddress = MacAddress([0xff; 6]);

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Group bit (least significant bit of the first octet).
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_mac(&self.0))
    }
}

/// A decoded Ethernet II frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetFrame<'a> {
    pub destination: MacAddress,
    pub source: MacAddress,
    pub ether_type: u16,
    /// Bytes following the header (offset 14 onwards).
    pub payload: &'a [u8],
}

/// Ethernet II protocol parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthernetProtocol;

impl Protocol for EthernetProtocol {
    type Header<'a> = EthernetFrame<'a>;

    fn name(&self) -> &'static str {
        "ethernet"
    }

    fn display_name(&self) -> &'static str {
        "Ethernet II"
    }

    fn layer(&self) -> Layer {
        Layer::Ethernet
    }

    fn min_header_len(&self) -> usize {
        HEADER_LEN
    }

    fn parse<'a>(&self, data: &'a [u8]) -> Result<EthernetFrame<'a>, DecodeError> {
        if data.len() < HEADER_LEN {
            return Err(DecodeError::TruncatedFrame {
                needed: HEADER_LEN,
                have: data.len(),
            });
        }

        let frame = EthernetFrame {
            destination: MacAddress(read_array(data, 0)?),
            source: MacAddress(read_array(data, 6)?),
            ether_type: read_be(data, 12)?,
            payload: &data[HEADER_LEN..],
        };

        debug!(
            ether_type = frame.ether_type,
            payload_len = frame.payload.len(),
            "decoded ethernet frame"
        );

        Ok(frame)
    }
}
