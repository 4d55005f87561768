//! framedecode - Decode captured Ethernet/IPv4/TCP frames.
//!
//! This library turns a raw frame (usually supplied as hex text) into typed,
//! borrowed records for each protocol layer, stopping cleanly when a tag names
//! a protocol it does not decode.
//!
//! # Example
//!
//! ```
//! use framedecode::codec::decode_hex;
//! use framedecode::protocol::{decode_frame, Layer, Outcome};
//!
//! let bytes = decode_hex("FFFFFFFFFFFF AAAAAAAAAAAA 88B5").unwrap();
//! let decoded = decode_frame(&bytes).unwrap();
//!
//! assert_eq!(decoded.ethernet.ether_type, 0x88B5);
//! assert!(matches!(
//!     decoded.outcome,
//!     Outcome::StoppedAtLayer { layer: Layer::Ethernet, .. }
//! ));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                           framedecode                               |
//! +---------------------------------------------------------------------+
//! |  codec/     - big-endian reads, bit fields, hex decoding            |
//! |  format/    - address and field value rendering                     |
//! |  protocol/  - Protocol trait, Ethernet/IPv4/TCP, DecodePipeline     |
//! |  cli/       - argument parsing and report output                    |
//! |  error/     - Error types                                           |
//! +---------------------------------------------------------------------+
//! ```

pub mod cli;
pub mod codec;
pub mod error;
pub mod format;
pub mod protocol;

pub use error::{DecodeError, Error, Result};
pub use protocol::{
    decode_frame, DecodePipeline, Decoded, Layer, Outcome, PipelineConfig, PipelineError,
    StopReason,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
