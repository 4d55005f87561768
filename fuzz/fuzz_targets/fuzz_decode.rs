//! Fuzz target for the layered frame decoder.
//!
//! Tests:
//! - Header bounds checking in each parser
//! - Payload clamping for oversized IHL and data offset
//! - Every layer limit, so early stops are exercised too

#![no_main]

use framedecode::protocol::{DecodePipeline, Layer, Outcome, PipelineConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for layer in [Layer::Ethernet, Layer::Ipv4, Layer::Tcp] {
        let pipeline = DecodePipeline::with_config(PipelineConfig::default().with_max_layer(layer));

        if let Ok(decoded) = pipeline.decode(data) {
            // Payload views always lie inside the input
            assert!(decoded.innermost_payload().len() <= data.len());
            if decoded.outcome == Outcome::Decoded {
                assert!(decoded.ipv4.is_some() && decoded.tcp.is_some());
            }
        }
    }
});
