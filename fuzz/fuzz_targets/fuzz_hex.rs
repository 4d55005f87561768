//! Fuzz target for hex text input.
//!
//! Arbitrary text goes through `decode_hex` and, when it decodes, the default
//! pipeline.

#![no_main]

use framedecode::codec::decode_hex;
use framedecode::protocol::decode_frame;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(bytes) = decode_hex(text) {
            let _ = decode_frame(&bytes);
        }
    }
});
