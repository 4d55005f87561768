//! TCP protocol parser.

use std::fmt;

use smallvec::SmallVec;
use tracing::{debug, warn};

use super::{Layer, Protocol};
use crate::codec::{extract_bits, read_be};
use crate::error::DecodeError;

/// Size of the fixed part of the TCP header.
pub const MIN_HEADER_LEN: usize = 20;

/// The six classic TCP control flags, held in their wire bit positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TcpFlags(u8);

impl TcpFlags {
    pub const URG: TcpFlags = TcpFlags(0x20);
    pub const ACK: TcpFlags = TcpFlags(0x10);
    pub const PSH: TcpFlags = TcpFlags(0x08);
    pub const RST: TcpFlags = TcpFlags(0x04);
    pub const SYN: TcpFlags = TcpFlags(0x02);
    pub const FIN: TcpFlags = TcpFlags(0x01);

    /// Every flag, most significant bit first.
    pub const ALL: [(TcpFlags, &'static str); 6] = [
        (TcpFlags::URG, "URG"),
        (TcpFlags::ACK, "ACK"),
        (TcpFlags::PSH, "PSH"),
        (TcpFlags::RST, "RST"),
        (TcpFlags::SYN, "SYN"),
        (TcpFlags::FIN, "FIN"),
    ];

    /// Build from the low six bits of `bits`; higher bits are dropped.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        TcpFlags(bits & 0x3f)
    }

    pub const fn empty() -> Self {
        TcpFlags(0)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, other: TcpFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Names of the set flags in URG, ACK, PSH, RST, SYN, FIN order.
    pub fn names(&self) -> SmallVec<[&'static str; 6]> {
        Self::ALL
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl std::ops::BitOr for TcpFlags {
    type Output = TcpFlags;

    fn bitor(self, rhs: TcpFlags) -> TcpFlags {
        TcpFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for TcpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        f.write_str(&self.names().join("|"))
    }
}

/// A decoded TCP segment.
///
/// The checksum is reported as found and never verified. Options are not
/// interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpSegment<'a> {
    pub source_port: u16,
    pub destination_port: u16,
    pub sequence_number: u32,
    pub acknowledgment_number: u32,
    /// Header length in 32-bit words.
    pub data_offset: u8,
    pub flags: TcpFlags,
    pub window_size: u16,
    pub checksum: u16,
    pub urgent_pointer: u16,
    /// Bytes from `data_offset * 4` onwards, empty if that is past the buffer.
    pub payload: &'a [u8],
    options: &'a [u8],
}

impl<'a> TcpSegment<'a> {
    /// Header length in bytes as declared by the data offset.
    pub fn header_len(&self) -> usize {
        self.data_offset as usize * 4
    }

    /// Raw option bytes between the fixed header and the payload.
    pub fn options(&self) -> &'a [u8] {
        self.options
    }
}

/// TCP protocol parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProtocol;

impl Protocol for TcpProtocol {
    type Header<'a> = TcpSegment<'a>;

    fn name(&self) -> &'static str {
        "tcp"
    }

    fn display_name(&self) -> &'static str {
        "TCP"
    }

    fn layer(&self) -> Layer {
        Layer::Tcp
    }

    fn min_header_len(&self) -> usize {
        MIN_HEADER_LEN
    }

    fn parse<'a>(&self, data: &'a [u8]) -> Result<TcpSegment<'a>, DecodeError> {
        if data.len() < MIN_HEADER_LEN {
            return Err(DecodeError::TruncatedSegment {
                needed: MIN_HEADER_LEN,
                have: data.len(),
            });
        }

        let data_offset = extract_bits(read_be::<u8>(data, 12)? as u32, 7, 4) as u8;
        let flags = extract_bits(read_be::<u8>(data, 13)? as u32, 5, 0) as u8;

        if (data_offset as usize) * 4 < MIN_HEADER_LEN {
            warn!(data_offset, "TCP data offset below minimum, payload overlaps fixed header");
        }

        let header_len = data_offset as usize * 4;
        let payload = data.get(header_len..).unwrap_or(&[]);
        let options = data
            .get(MIN_HEADER_LEN..header_len.min(data.len()))
            .unwrap_or(&[]);

        let segment = TcpSegment {
            source_port: read_be(data, 0)?,
            destination_port: read_be(data, 2)?,
            sequence_number: read_be(data, 4)?,
            acknowledgment_number: read_be(data, 8)?,
            data_offset,
            flags: TcpFlags::from_bits_truncate(flags),
            window_size: read_be(data, 14)?,
            checksum: read_be(data, 16)?,
            urgent_pointer: read_be(data, 18)?,
            payload,
            options,
        };

        debug!(
            data_offset = segment.data_offset,
            flags = %segment.flags,
            payload_len = segment.payload.len(),
            "decoded tcp segment"
        );

        Ok(segment)
    }
}
