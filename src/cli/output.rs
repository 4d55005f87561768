//! Output formatting for decoded frames.
//!
//! Every decoded layer is flattened into named fields. Packed fields keep their
//! raw value and bit width so the table can show them in hex and binary next
//! to the interpreted value.

use std::io::Write;

use clap::ValueEnum;
use serde_json::Value;

use crate::format::{format_bits, format_hex, format_ipv4, format_mac};
use crate::protocol::{
    ethertype, ip_protocol, Decoded, EthernetFrame, Ipv4Packet, Layer, PipelineError, TcpSegment,
};

/// Number of payload bytes shown in the table preview.
const PREVIEW_LEN: usize = 64;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed tables, one per layer (default)
    Table,
    /// Comma-separated `layer,field,value` rows
    Csv,
    /// A single JSON object
    Json,
}

/// One named header field.
struct Field {
    name: &'static str,
    value: String,
    json: Value,
    /// Raw value and its width in bits.
    raw: Option<(u32, u32)>,
}

impl Field {
    fn number(name: &'static str, value: u32, bits: u32) -> Self {
        Self {
            name,
            value: value.to_string(),
            json: Value::from(value),
            raw: Some((value, bits)),
        }
    }

    fn text(name: &'static str, value: String) -> Self {
        Self {
            name,
            json: Value::String(value.clone()),
            value,
            raw: None,
        }
    }

    /// A numeric tag with an optional well-known name.
    fn tag(name: &'static str, value: u32, bits: u32, label: Option<&str>) -> Self {
        let mut field = Self::number(name, value, bits);
        if let Some(label) = label {
            field.value = format!("{value} ({label})");
        }
        field
    }
}

/// Flattened view of a pipeline run, decoded or failed.
struct Report<'a> {
    layers: Vec<(Layer, Vec<Field>)>,
    payload: &'a [u8],
    outcome: String,
}

impl<'a> Report<'a> {
    fn from_layers(
        ethernet: Option<&EthernetFrame<'a>>,
        ipv4: Option<&Ipv4Packet<'a>>,
        tcp: Option<&TcpSegment<'a>>,
        outcome: String,
    ) -> Self {
        let mut layers = Vec::with_capacity(3);
        let mut payload: &[u8] = &[];

        if let Some(frame) = ethernet {
            layers.push((Layer::Ethernet, ethernet_fields(frame)));
            payload = frame.payload;
        }
        if let Some(packet) = ipv4 {
            layers.push((Layer::Ipv4, ipv4_fields(packet)));
            payload = packet.payload;
        }
        if let Some(segment) = tcp {
            layers.push((Layer::Tcp, tcp_fields(segment)));
            payload = segment.payload;
        }

        Self {
            layers,
            payload,
            outcome,
        }
    }

    fn fields(&self, layer: Layer) -> Option<&[Field]> {
        self.layers
            .iter()
            .find(|(l, _)| *l == layer)
            .map(|(_, fields)| fields.as_slice())
    }
}

fn ethernet_fields(frame: &EthernetFrame<'_>) -> Vec<Field> {
    vec![
        Field::text("destination", format_mac(&frame.destination.octets())),
        Field::text("source", format_mac(&frame.source.octets())),
        Field::tag(
            "ether_type",
            u32::from(frame.ether_type),
            16,
            ethertype::name(frame.ether_type),
        ),
    ]
}

fn ipv4_fields(packet: &Ipv4Packet<'_>) -> Vec<Field> {
    vec![
        Field::number("version", packet.version.into(), 4),
        Field::number("ihl", packet.ihl.into(), 4),
        Field::number("dscp", packet.dscp.into(), 6),
        Field::number("ecn", packet.ecn.into(), 2),
        Field::number("total_length", packet.total_length.into(), 16),
        Field::number("identification", packet.identification.into(), 16),
        Field::number("flags", packet.flags.into(), 3),
        Field::number("fragment_offset", packet.fragment_offset.into(), 13),
        Field::number("ttl", packet.ttl.into(), 8),
        Field::tag(
            "protocol",
            packet.protocol.into(),
            8,
            ip_protocol::name(packet.protocol),
        ),
        Field::number("header_checksum", packet.header_checksum.into(), 16),
        Field::text("source", format_ipv4(&packet.source.octets())),
        Field::text("destination", format_ipv4(&packet.destination.octets())),
    ]
}

fn tcp_fields(segment: &TcpSegment<'_>) -> Vec<Field> {
    let mut flags = Field::number("flags", segment.flags.bits().into(), 6);
    flags.value = segment.flags.to_string();

    vec![
        Field::number("source_port", segment.source_port.into(), 16),
        Field::number("destination_port", segment.destination_port.into(), 16),
        Field::number("sequence_number", segment.sequence_number, 32),
        Field::number("acknowledgment_number", segment.acknowledgment_number, 32),
        Field::number("data_offset", segment.data_offset.into(), 4),
        flags,
        Field::number("window_size", segment.window_size.into(), 16),
        Field::number("checksum", segment.checksum.into(), 16),
        Field::number("urgent_pointer", segment.urgent_pointer.into(), 16),
    ]
}

/// Formats decoded frames for output.
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Create a new formatter with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write a successful pipeline run.
    pub fn write<W: Write>(&self, decoded: &Decoded<'_>, writer: &mut W) -> std::io::Result<()> {
        let report = Report::from_layers(
            Some(&decoded.ethernet),
            decoded.ipv4.as_ref(),
            decoded.tcp.as_ref(),
            decoded.outcome.to_string(),
        );
        self.write_report(&report, writer)
    }

    /// Write the layers decoded before a pipeline failure, followed by the error.
    pub fn write_partial<W: Write>(
        &self,
        error: &PipelineError<'_>,
        writer: &mut W,
    ) -> std::io::Result<()> {
        let report = Report::from_layers(
            error.ethernet.as_ref(),
            error.ipv4.as_ref(),
            None,
            format!("error: {error}"),
        );
        self.write_report(&report, writer)
    }

    fn write_report<W: Write>(&self, report: &Report<'_>, writer: &mut W) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Table => self.write_table(report, writer),
            OutputFormat::Csv => self.write_csv(report, writer),
            OutputFormat::Json => self.write_json(report, writer),
        }
    }

    fn write_table<W: Write>(&self, report: &Report<'_>, writer: &mut W) -> std::io::Result<()> {
        use comfy_table::{Cell, Table};

        for (layer, fields) in &report.layers {
            writeln!(writer, "{layer}")?;

            let mut table = Table::new();
            table.set_header(vec!["Field", "Value", "Hex", "Binary"]);
            for field in fields {
                let (hex, binary) = match field.raw {
                    Some((value, bits)) => (format_hex(value, bits), format_bits(value, bits)),
                    None => (String::new(), String::new()),
                };
                table.add_row(vec![
                    Cell::new(field.name),
                    Cell::new(&field.value),
                    Cell::new(hex),
                    Cell::new(binary),
                ]);
            }
            writeln!(writer, "{table}")?;
        }

        writeln!(writer, "Outcome: {}", report.outcome)?;
        writeln!(writer, "Payload: {} bytes", report.payload.len())?;
        if !report.payload.is_empty() {
            let shown = &report.payload[..report.payload.len().min(PREVIEW_LEN)];
            let ellipsis = if shown.len() < report.payload.len() { "..." } else { "" };
            writeln!(
                writer,
                "Preview: {:?}{ellipsis}",
                String::from_utf8_lossy(shown)
            )?;
        }

        Ok(())
    }

    fn write_csv<W: Write>(&self, report: &Report<'_>, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "layer,field,value")?;

        for (layer, fields) in &report.layers {
            for field in fields {
                writeln!(writer, "{},{},{}", layer.as_str(), field.name, escape_csv(&field.value))?;
            }
        }
        writeln!(writer, "frame,payload_len,{}", report.payload.len())?;
        writeln!(writer, "frame,outcome,{}", escape_csv(&report.outcome))?;

        Ok(())
    }

    fn write_json<W: Write>(&self, report: &Report<'_>, writer: &mut W) -> std::io::Result<()> {
        let mut obj = serde_json::Map::new();

        for layer in [Layer::Ethernet, Layer::Ipv4, Layer::Tcp] {
            let value = match report.fields(layer) {
                Some(fields) => Value::Object(
                    fields
                        .iter()
                        .map(|field| (field.name.to_string(), field.json.clone()))
                        .collect(),
                ),
                None => Value::Null,
            };
            obj.insert(layer.as_str().to_ascii_lowercase(), value);
        }
        obj.insert("payload_len".to_string(), Value::from(report.payload.len()));
        obj.insert("outcome".to_string(), Value::String(report.outcome.clone()));

        writeln!(writer, "{}", Value::Object(obj))
    }
}

/// Quote a CSV value if it contains a delimiter, quote or newline.
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
