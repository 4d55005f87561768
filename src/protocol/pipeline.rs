//! Layered decode of a single captured frame.
//!
//! The pipeline walks Ethernet -> IPv4 -> TCP, feeding each layer's payload to
//! the next. It stops without error when a tag names a protocol it does not
//! decode, and aborts with the parser's error when a header is truncated.
//! Layers decoded before a stop or failure are always handed back.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use super::ethernet::{ethertype, EthernetFrame, EthernetProtocol};
use super::ipv4::{ip_protocol, Ipv4Packet, Ipv4Protocol};
use super::tcp::{TcpProtocol, TcpSegment};
use super::{Layer, Protocol};
use crate::error::DecodeError;

/// Why decoding ended before the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The Ethernet frame carries something other than IPv4.
    UnsupportedEtherType(u16),
    /// The IPv4 packet carries something other than TCP.
    UnsupportedProtocol(u8),
    /// The configured maximum layer was reached.
    LayerLimit,
}

impl StopReason {
    /// Whether the stop was caused by an in-band tag naming an unhandled
    /// next-layer protocol.
    pub fn is_unsupported_next_layer(&self) -> bool {
        matches!(
            self,
            StopReason::UnsupportedEtherType(_) | StopReason::UnsupportedProtocol(_)
        )
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::UnsupportedEtherType(value) => {
                write!(f, "unsupported etherType 0x{value:04X}")
            }
            StopReason::UnsupportedProtocol(value) => write!(f, "unsupported protocol {value}"),
            StopReason::LayerLimit => f.write_str("layer limit reached"),
        }
    }
}

/// Terminal outcome of a successful pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// All three layers were decoded.
    Decoded,
    /// Decoding stopped after `layer`, which itself decoded successfully.
    StoppedAtLayer { layer: Layer, reason: StopReason },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Decoded => f.write_str("decoded"),
            Outcome::StoppedAtLayer { layer, reason } => {
                write!(f, "stopped at {layer}: {reason}")
            }
        }
    }
}

/// Layers produced by a pipeline run.
///
/// `ipv4` is present whenever `tcp` is; with `Outcome::Decoded` both are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded<'a> {
    pub ethernet: EthernetFrame<'a>,
    pub ipv4: Option<Ipv4Packet<'a>>,
    pub tcp: Option<TcpSegment<'a>>,
    pub outcome: Outcome,
}

impl<'a> Decoded<'a> {
    /// Payload of the innermost decoded layer.
    pub fn innermost_payload(&self) -> &'a [u8] {
        if let Some(tcp) = &self.tcp {
            tcp.payload
        } else if let Some(ip) = &self.ipv4 {
            ip.payload
        } else {
            self.ethernet.payload
        }
    }

    /// Deepest layer that decoded.
    pub fn innermost_layer(&self) -> Layer {
        if self.tcp.is_some() {
            Layer::Tcp
        } else if self.ipv4.is_some() {
            Layer::Ipv4
        } else {
            Layer::Ethernet
        }
    }

    pub fn is_complete(&self) -> bool {
        self.outcome == Outcome::Decoded
    }
}

/// A pipeline run that failed, with the layers decoded before the failure.
///
/// Displays as the underlying [`DecodeError`]; no separate source is reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct PipelineError<'a> {
    pub ethernet: Option<EthernetFrame<'a>>,
    pub ipv4: Option<Ipv4Packet<'a>>,
    pub error: DecodeError,
}

impl<'a> PipelineError<'a> {
    fn new(error: DecodeError) -> Self {
        Self {
            ethernet: None,
            ipv4: None,
            error,
        }
    }

    /// Discard the partial layers, keeping the underlying error.
    pub fn into_error(self) -> DecodeError {
        self.error
    }
}

/// Pipeline settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Deepest layer to decode; reaching it stops with [`StopReason::LayerLimit`].
    pub max_layer: Layer,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_layer: Layer::Tcp,
        }
    }
}

impl PipelineConfig {
    pub fn with_max_layer(mut self, layer: Layer) -> Self {
        self.max_layer = layer;
        self
    }
}

/// Where the pipeline is, carrying everything decoded so far.
enum State<'a> {
    AwaitingEthernet(&'a [u8]),
    AwaitingInternetLayer(EthernetFrame<'a>),
    AwaitingTransportLayer(EthernetFrame<'a>, Ipv4Packet<'a>),
}

/// Ethernet -> IPv4 -> TCP decoder.
///
/// Holds only configuration; every call to [`DecodePipeline::decode`] is
/// independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodePipeline {
    config: PipelineConfig,
}

impl DecodePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Decode `data` as far as the tags and the configured limit allow.
    pub fn decode<'a>(&self, data: &'a [u8]) -> Result<Decoded<'a>, PipelineError<'a>> {
        let mut state = State::AwaitingEthernet(data);

        loop {
            state = match state {
                State::AwaitingEthernet(bytes) => {
                    let frame = EthernetProtocol.parse(bytes).map_err(PipelineError::new)?;

                    if let Some(reason) = self.stop_after(Layer::Ethernet, || {
                        (frame.ether_type != ethertype::IPV4)
                            .then_some(StopReason::UnsupportedEtherType(frame.ether_type))
                    }) {
                        return Ok(stopped(frame, None, Layer::Ethernet, reason));
                    }
                    State::AwaitingInternetLayer(frame)
                }
                State::AwaitingInternetLayer(frame) => {
                    let packet = Ipv4Protocol.parse(frame.payload).map_err(|error| {
                        PipelineError {
                            ethernet: Some(frame),
                            ipv4: None,
                            error,
                        }
                    })?;

                    if let Some(reason) = self.stop_after(Layer::Ipv4, || {
                        (packet.protocol != ip_protocol::TCP)
                            .then_some(StopReason::UnsupportedProtocol(packet.protocol))
                    }) {
                        return Ok(stopped(frame, Some(packet), Layer::Ipv4, reason));
                    }
                    State::AwaitingTransportLayer(frame, packet)
                }
                State::AwaitingTransportLayer(frame, packet) => {
                    let segment = TcpProtocol.parse(packet.payload).map_err(|error| {
                        PipelineError {
                            ethernet: Some(frame),
                            ipv4: Some(packet),
                            error,
                        }
                    })?;

                    debug!(payload_len = segment.payload.len(), "frame fully decoded");
                    return Ok(Decoded {
                        ethernet: frame,
                        ipv4: Some(packet),
                        tcp: Some(segment),
                        outcome: Outcome::Decoded,
                    });
                }
            };
        }
    }

    /// Decide whether to stop after `layer`: an unsupported tag wins over the
    /// configured limit.
    fn stop_after(
        &self,
        layer: Layer,
        unsupported: impl FnOnce() -> Option<StopReason>,
    ) -> Option<StopReason> {
        unsupported().or_else(|| (self.config.max_layer <= layer).then_some(StopReason::LayerLimit))
    }
}

fn stopped<'a>(
    ethernet: EthernetFrame<'a>,
    ipv4: Option<Ipv4Packet<'a>>,
    layer: Layer,
    reason: StopReason,
) -> Decoded<'a> {
    debug!(%layer, %reason, "decode stopped");
    Decoded {
        ethernet,
        ipv4,
        tcp: None,
        outcome: Outcome::StoppedAtLayer { layer, reason },
    }
}

/// Decode `data` with the default pipeline.
pub fn decode_frame(data: &[u8]) -> Result<Decoded<'_>, PipelineError<'_>> {
    DecodePipeline::new().decode(data)
}
