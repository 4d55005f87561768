//! Protocol parsing module.
//!
//! This module provides:
//! - [`Protocol`] trait implemented by every header parser
//! - Ethernet II, IPv4 and TCP parsers producing borrowed header records
//! - [`DecodePipeline`] which chains them on EtherType and IP protocol tags
//!
//! ## Example
//!
//! ```rust
//! use framedecode::protocol::{decode_frame, Layer, Outcome, StopReason};
//!
//! // Ethernet header only, carrying an ARP EtherType
//! let frame: &[u8] = &[
//!     0xff, 0xff, 0xff, 0xff, 0xff, 0xff,  // dst mac
//!     0x00, 0x11, 0x22, 0x33, 0x44, 0x55,  // src mac
//!     0x08, 0x06,                          // ethertype (ARP)
//! ];
//!
//! let decoded = decode_frame(frame).unwrap();
//! assert_eq!(
//!     decoded.outcome,
//!     Outcome::StoppedAtLayer {
//!         layer: Layer::Ethernet,
//!         reason: StopReason::UnsupportedEtherType(0x0806),
//!     }
//! );
//! ```

mod pipeline;
mod registry;

// Protocol implementations
pub mod ethernet;
pub mod ipv4;
pub mod tcp;

// Test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;

pub use pipeline::{
    decode_frame, DecodePipeline, Decoded, Outcome, PipelineConfig, PipelineError, StopReason,
};
pub use registry::{BuiltinProtocol, Layer, Protocol};

// Re-export protocol implementations
pub use ethernet::{ethertype, EthernetFrame, EthernetProtocol, MacAddress};
pub use ipv4::{ip_protocol, Ipv4Packet, Ipv4Protocol};
pub use tcp::{TcpFlags, TcpProtocol, TcpSegment};
