//! Error types for framedecode.
//!
//! - [`enum@Error`] - Top-level error wrapping everything the crate can fail with
//! - [`DecodeError`] - Errors from hex decoding, field reads and header parsing
//!
//! Stopping at an unsupported next-layer protocol is not an error; see
//! [`crate::protocol::StopReason`].

use thiserror::Error;

use crate::protocol::Layer;

/// Main error type for framedecode operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error while decoding input or a protocol header
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning input into decoded layers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Hex text contained a non-hex character or an odd number of digits
    #[error("malformed hex input: {reason}")]
    MalformedHex { reason: String },

    /// A field read ran past the end of the buffer
    #[error("read of {width} bytes at offset {offset} exceeds buffer of {len} bytes")]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },

    /// Buffer shorter than an Ethernet II header
    #[error("Ethernet: truncated frame (need {needed} bytes, have {have})")]
    TruncatedFrame { needed: usize, have: usize },

    /// Buffer shorter than the fixed IPv4 header
    #[error("IPv4: truncated packet (need {needed} bytes, have {have})")]
    TruncatedPacket { needed: usize, have: usize },

    /// Buffer shorter than the fixed TCP header
    #[error("TCP: truncated segment (need {needed} bytes, have {have})")]
    TruncatedSegment { needed: usize, have: usize },
}

impl DecodeError {
    /// The protocol layer that failed, if the error came from a header parser.
    pub fn layer(&self) -> Option<Layer> {
        match self {
            DecodeError::TruncatedFrame { .. } => Some(Layer::Ethernet),
            DecodeError::TruncatedPacket { .. } => Some(Layer::Ipv4),
            DecodeError::TruncatedSegment { .. } => Some(Layer::Tcp),
            DecodeError::MalformedHex { .. } | DecodeError::OutOfBounds { .. } => None,
        }
    }

    /// Whether this is a minimum-header-length failure of some layer.
    pub fn is_truncation(&self) -> bool {
        self.layer().is_some()
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
