//! Fuzz target: `NecDecoder::feed`
//!
//! Drives arbitrary edge streams into the pulse-train decoder and asserts
//! that it never panics, that a repeat frame can only follow a decoded
//! press, and that a reset leaves it ready to accept edges again.
//!
//! cargo fuzz run fuzz_nec_decoder

#![no_main]

use irlamp::drivers::ir_receiver::NecDecoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decoder = NecDecoder::new();
    let mut seen_press = false;

    for chunk in data.chunks_exact(3) {
        let level_low = chunk[0] & 1 == 1;
        let dt_us = u32::from(u16::from_le_bytes([chunk[1], chunk[2]]));

        if let Some(frame) = decoder.feed(level_low, dt_us) {
            assert!(frame.command <= 0xFF, "command is a single decoded byte");
            if frame.repeat {
                assert!(seen_press, "repeat frame before any decoded press");
            } else {
                seen_press = true;
            }
        }
    }

    // After a reset the decoder must accept edges cleanly again.
    decoder.reset();
    let _ = decoder.feed(true, 9_000);
});
