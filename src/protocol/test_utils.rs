//! Test utilities for protocol parsing.
//!
//! Builders for constructing Ethernet/IPv4/TCP test frames byte by byte.
//! Header-length fields follow the options given unless overridden, so tests
//! can also produce deliberately inconsistent headers.

/// Builder for constructing Ethernet frames.
#[derive(Debug, Clone)]
pub struct EthernetBuilder {
    src_mac: [u8; 6],
    dst_mac: [u8; 6],
    ethertype: u16,
    payload: Vec<u8>,
}

impl Default for EthernetBuilder {
    fn default() -> Self {
        Self {
            src_mac: [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
            dst_mac: [0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
            ethertype: 0x0800, // IPv4
            payload: Vec::new(),
        }
    }
}

impl EthernetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ethertype(mut self, ethertype: u16) -> Self {
        self.ethertype = ethertype;
        self
    }

    pub fn ipv4(self) -> Self {
        self.ethertype(0x0800)
    }

    pub fn ipv6(self) -> Self {
        self.ethertype(0x86DD)
    }

    pub fn arp(self) -> Self {
        self.ethertype(0x0806)
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(14 + self.payload.len());
        frame.extend_from_slice(&self.dst_mac);
        frame.extend_from_slice(&self.src_mac);
        frame.extend_from_slice(&self.ethertype.to_be_bytes());
        frame.extend_from_slice(&self.payload);
        frame
    }
}

/// Builder for constructing IPv4 headers.
#[derive(Debug, Clone)]
pub struct Ipv4Builder {
    version: u8,
    ihl: Option<u8>,
    dscp_ecn: u8,
    identification: u16,
    flags_fragment: u16,
    ttl: u8,
    protocol: u8,
    checksum: u16,
    src_ip: [u8; 4],
    dst_ip: [u8; 4],
    options: Vec<u8>,
    payload: Vec<u8>,
}

impl Default for Ipv4Builder {
    fn default() -> Self {
        Self {
            version: 4,
            ihl: None,
            dscp_ecn: 0x00,
            identification: 0x0001,
            flags_fragment: 0x0000,
            ttl: 64,
            protocol: 6, // TCP
            checksum: 0x0000,
            src_ip: [192, 168, 1, 1],
            dst_ip: [192, 168, 1, 2],
            options: Vec::new(),
            payload: Vec::new(),
        }
    }
}

impl Ipv4Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Force the IHL nibble instead of deriving it from the options.
    pub fn ihl(mut self, ihl: u8) -> Self {
        self.ihl = Some(ihl);
        self
    }

    pub fn dscp_ecn(mut self, dscp: u8, ecn: u8) -> Self {
        self.dscp_ecn = (dscp << 2) | (ecn & 0x03);
        self
    }

    pub fn identification(mut self, id: u16) -> Self {
        self.identification = id;
        self
    }

    pub fn flags_fragment(mut self, flags: u8, offset: u16) -> Self {
        self.flags_fragment = ((flags as u16) << 13) | (offset & 0x1fff);
        self
    }

    pub fn ttl(mut self, ttl: u8) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn protocol(mut self, protocol: u8) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn tcp(self) -> Self {
        self.protocol(6)
    }

    pub fn udp(self) -> Self {
        self.protocol(17)
    }

    pub fn checksum(mut self, checksum: u16) -> Self {
        self.checksum = checksum;
        self
    }

    pub fn src_ip(mut self, ip: [u8; 4]) -> Self {
        self.src_ip = ip;
        self
    }

    pub fn dst_ip(mut self, ip: [u8; 4]) -> Self {
        self.dst_ip = ip;
        self
    }

    /// Raw option bytes; should be a multiple of 4 for a consistent IHL.
    pub fn options(mut self, options: Vec<u8>) -> Self {
        self.options = options;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let header_len = 20 + self.options.len();
        let ihl = self.ihl.unwrap_or((header_len / 4) as u8);
        let total_length = (header_len + self.payload.len()) as u16;
        let mut header = Vec::with_capacity(header_len + self.payload.len());

        header.push((self.version << 4) | (ihl & 0x0f));
        header.push(self.dscp_ecn);
        header.extend_from_slice(&total_length.to_be_bytes());
        header.extend_from_slice(&self.identification.to_be_bytes());
        header.extend_from_slice(&self.flags_fragment.to_be_bytes());
        header.push(self.ttl);
        header.push(self.protocol);
        header.extend_from_slice(&self.checksum.to_be_bytes()); // Not calculated
        header.extend_from_slice(&self.src_ip);
        header.extend_from_slice(&self.dst_ip);
        header.extend_from_slice(&self.options);
        header.extend_from_slice(&self.payload);

        header
    }
}

/// Builder for constructing TCP headers.
#[derive(Debug, Clone)]
pub struct TcpBuilder {
    src_port: u16,
    dst_port: u16,
    seq: u32,
    ack: u32,
    data_offset: Option<u8>,
    flags: u8,
    window: u16,
    urgent_ptr: u16,
    options: Vec<u8>,
    payload: Vec<u8>,
}

impl Default for TcpBuilder {
    fn default() -> Self {
        Self {
            src_port: 12345,
            dst_port: 80,
            seq: 1,
            ack: 0,
            data_offset: None,
            flags: 0x02, // SYN
            window: 65535,
            urgent_ptr: 0,
            options: Vec::new(),
            payload: Vec::new(),
        }
    }
}

impl TcpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src_port(mut self, port: u16) -> Self {
        self.src_port = port;
        self
    }

    pub fn dst_port(mut self, port: u16) -> Self {
        self.dst_port = port;
        self
    }

    pub fn seq(mut self, seq: u32) -> Self {
        self.seq = seq;
        self
    }

    pub fn ack_num(mut self, ack: u32) -> Self {
        self.ack = ack;
        self
    }

    /// Force the data offset nibble instead of deriving it from the options.
    pub fn data_offset(mut self, words: u8) -> Self {
        self.data_offset = Some(words);
        self
    }

    pub fn flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    pub fn window(mut self, window: u16) -> Self {
        self.window = window;
        self
    }

    pub fn urgent_ptr(mut self, ptr: u16) -> Self {
        self.urgent_ptr = ptr;
        self
    }

    /// Raw option bytes; should be a multiple of 4 for a consistent offset.
    pub fn options(mut self, options: Vec<u8>) -> Self {
        self.options = options;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let header_len = 20 + self.options.len();
        let data_offset = self.data_offset.unwrap_or((header_len / 4) as u8);
        let mut header = Vec::with_capacity(header_len + self.payload.len());

        header.extend_from_slice(&self.src_port.to_be_bytes());
        header.extend_from_slice(&self.dst_port.to_be_bytes());
        header.extend_from_slice(&self.seq.to_be_bytes());
        header.extend_from_slice(&self.ack.to_be_bytes());
        header.push(data_offset << 4); // Data offset + reserved
        header.push(self.flags);
        header.extend_from_slice(&self.window.to_be_bytes());
        header.extend_from_slice(&[0x00, 0x00]); // Checksum
        header.extend_from_slice(&self.urgent_ptr.to_be_bytes());
        header.extend_from_slice(&self.options);
        header.extend_from_slice(&self.payload);

        header
    }
}

/// Ethernet + IPv4 + TCP frame with default headers around `payload`.
pub fn tcp_frame(payload: &[u8]) -> Vec<u8> {
    let tcp = TcpBuilder::new().payload(payload.to_vec()).build();
    let ip = Ipv4Builder::new().tcp().payload(tcp).build();
    EthernetBuilder::new().ipv4().payload(ip).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_compose_to_54_bytes() {
        let frame = tcp_frame(&[]);
        assert_eq!(frame.len(), 54);
        assert_eq!(&frame[12..14], &[0x08, 0x00]);
        assert_eq!(frame[14], 0x45);
        assert_eq!(frame[23], 6);
        assert_eq!(frame[46], 0x50);
    }

    #[test]
    fn test_options_grow_header_length() {
        let ip = Ipv4Builder::new().options(vec![1, 1, 1, 0]).build();
        assert_eq!(ip[0], 0x46);
        assert_eq!(u16::from_be_bytes([ip[2], ip[3]]), 24);

        let tcp = TcpBuilder::new().options(vec![0; 8]).build();
        assert_eq!(tcp[12], 0x70);
        assert_eq!(tcp.len(), 28);
    }
}
